//! Layered server configuration.
//!
//! Precedence, lowest to highest:
//! 1) built-in defaults -> 2) YAML file (if provided) -> 3) env (`CALCULATOR__*`)
//! -> 4) CLI overrides.
//!
//! Nested keys use `__` in environment variables, e.g.
//! `CALCULATOR__SERVER__LISTEN_ADDR=127.0.0.1:6000`.

use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CALCULATOR__";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:50051";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP address to bind; port `0` picks an ephemeral port.
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `calculator=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Values taken from the command line that win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen_addr: Option<String>,
    /// Log verbosity level (-v info, -vv debug, -vvv trace); 0 keeps the configured level.
    pub verbose: u8,
}

impl AppConfig {
    /// Build the layered figment without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    /// Returns an error if `path` does not point to a file or if any layer
    /// fails to parse or contains unknown keys.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path
            && !path.is_file()
        {
            anyhow::bail!("config file does not exist: {}", path.display());
        }

        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(addr) = &cli.listen_addr {
            self.server.listen_addr.clone_from(addr);
        }

        let level = match cli.verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }

    /// Render the effective configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|_jail| {
            let cfg = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg, AppConfig::default());
            assert_eq!(cfg.server.listen_addr, "0.0.0.0:50051");
            assert_eq!(cfg.logging.level, "info");
            assert_eq!(cfg.logging.format, LogFormat::Text);
            Ok(())
        });
    }

    #[test]
    fn yaml_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "calculator.yaml",
                r"
server:
  listen_addr: 127.0.0.1:7000
logging:
  level: debug
  format: json
",
            )?;
            jail.set_env("CALCULATOR__SERVER__LISTEN_ADDR", "127.0.0.1:7001");

            let cfg = AppConfig::load(Some(Path::new("calculator.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(cfg.server.listen_addr, "127.0.0.1:7001");
            assert_eq!(cfg.logging.level, "debug");
            assert_eq!(cfg.logging.format, LogFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("calculator.yaml", "server:\n  port: 50051\n")?;
            assert!(AppConfig::load(Some(Path::new("calculator.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn missing_config_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = AppConfig::load(Some(Path::new("nope.yaml"))).unwrap_err();
            assert!(err.to_string().contains("config file does not exist"));
            Ok(())
        });
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(&CliOverrides {
            listen_addr: Some("127.0.0.1:0".to_owned()),
            verbose: 2,
        });
        assert_eq!(cfg.server.listen_addr, "127.0.0.1:0");
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(&CliOverrides {
            listen_addr: None,
            verbose: 0,
        });
        assert_eq!(cfg.server.listen_addr, "127.0.0.1:0");
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(&CliOverrides {
            listen_addr: None,
            verbose: 5,
        });
        assert_eq!(cfg.logging.level, "trace");
    }

    #[test]
    fn json_dump_contains_effective_values() {
        let cfg = AppConfig::default();
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"listen_addr\": \"0.0.0.0:50051\""));
        assert!(json.contains("\"format\": \"text\""));
    }
}

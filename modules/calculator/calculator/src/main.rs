//! Calculator gRPC server binary.
//!
//! Configuration is layered from defaults, an optional YAML file
//! (`--config`), `CALCULATOR__*` environment variables and CLI flags.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use calculator::config::{AppConfig, CliOverrides};

/// Calculator gRPC server
#[derive(Parser)]
#[command(name = "calculator-server")]
#[command(about = "Stateless integer calculator exposed over gRPC")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address override, e.g. 127.0.0.1:50051
    #[arg(short, long)]
    listen_addr: Option<String>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        listen_addr: cli.listen_addr,
        verbose: cli.verbose,
    });

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    calculator::logging::init_logging(&config.logging)?;
    tracing::info!("calculator server starting");

    let listener = calculator::bind(&config.server.listen_addr).await?;

    let cancel = CancellationToken::new();
    let cancel_for_signals = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "shutdown: failed to listen for ctrl-c");
            return;
        }
        tracing::info!("shutdown: signal received");
        cancel_for_signals.cancel();
    });

    calculator::serve(listener, cancel).await
}

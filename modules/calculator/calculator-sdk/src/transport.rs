//! gRPC client transport configuration and channel construction.
//!
//! Covers transport-level settings only: connect and per-RPC timeouts plus
//! HTTP/2 keepalive. There is no retry layer; every calculation is a single
//! attempt.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::Instrument;

fn duration_to_i64_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Configuration for the gRPC client transport stack.
#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,

    /// Deadline for each RPC, applied at transport level.
    pub rpc_timeout: Duration,

    /// TCP and HTTP/2 keepalive ping interval.
    pub keepalive_interval: Duration,

    /// How long to wait for a keepalive ack before closing the connection.
    pub keepalive_timeout: Duration,

    /// Service name for tracing.
    pub service_name: &'static str,

    /// Emit an info event once a channel is connected.
    pub enable_tracing: bool,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            rpc_timeout: Duration::from_secs(30),
            keepalive_interval: Duration::from_secs(30),
            keepalive_timeout: Duration::from_secs(10),
            service_name: "grpc_client",
            enable_tracing: true,
        }
    }
}

impl GrpcClientConfig {
    /// Create a new configuration with the given service name.
    #[must_use]
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            ..Default::default()
        }
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the RPC timeout.
    #[must_use]
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    /// Set the keepalive ping interval and ack timeout.
    #[must_use]
    pub fn with_keepalive(mut self, interval: Duration, timeout: Duration) -> Self {
        self.keepalive_interval = interval;
        self.keepalive_timeout = timeout;
        self
    }

    /// Disable tracing.
    #[must_use]
    pub fn without_tracing(mut self) -> Self {
        self.enable_tracing = false;
        self
    }
}

/// Build a tonic `Endpoint` with timeouts and keepalive settings.
pub(crate) fn build_endpoint(
    uri: String,
    cfg: &GrpcClientConfig,
) -> Result<Endpoint, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(uri)?
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.rpc_timeout)
        .tcp_keepalive(Some(cfg.keepalive_interval))
        .http2_keep_alive_interval(cfg.keepalive_interval)
        .keep_alive_timeout(cfg.keepalive_timeout)
        .keep_alive_while_idle(true);

    Ok(endpoint)
}

/// Establish a channel eagerly, inside a `grpc_connect` span.
pub(crate) async fn connect_channel(
    uri: String,
    cfg: &GrpcClientConfig,
) -> Result<Channel, tonic::transport::Error> {
    let span = tracing::debug_span!(
        "grpc_connect",
        service = cfg.service_name,
        uri = %uri
    );

    async move {
        let endpoint = build_endpoint(uri, cfg)?;
        let channel = endpoint.connect().await?;

        if cfg.enable_tracing {
            let connect_timeout_ms = duration_to_i64_ms(cfg.connect_timeout);
            let rpc_timeout_ms = duration_to_i64_ms(cfg.rpc_timeout);
            tracing::info!(
                service_name = cfg.service_name,
                connect_timeout_ms,
                rpc_timeout_ms,
                "gRPC client connected"
            );
        }

        Ok(channel)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GrpcClientConfig::default();
        assert_eq!(cfg.connect_timeout, Duration::from_secs(10));
        assert_eq!(cfg.rpc_timeout, Duration::from_secs(30));
        assert_eq!(cfg.keepalive_interval, Duration::from_secs(30));
        assert_eq!(cfg.keepalive_timeout, Duration::from_secs(10));
        assert!(cfg.enable_tracing);
    }

    #[test]
    fn test_config_builder() {
        let cfg = GrpcClientConfig::new("calculator")
            .with_connect_timeout(Duration::from_secs(5))
            .with_rpc_timeout(Duration::from_millis(1500))
            .with_keepalive(Duration::from_secs(5), Duration::from_secs(2))
            .without_tracing();

        assert_eq!(cfg.service_name, "calculator");
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
        assert_eq!(cfg.rpc_timeout, Duration::from_millis(1500));
        assert_eq!(cfg.keepalive_interval, Duration::from_secs(5));
        assert_eq!(cfg.keepalive_timeout, Duration::from_secs(2));
        assert!(!cfg.enable_tracing);
    }

    #[test]
    fn test_build_endpoint_succeeds() {
        let cfg = GrpcClientConfig::default();
        let result = build_endpoint("http://localhost:50051".to_owned(), &cfg);
        assert!(
            result.is_ok(),
            "build_endpoint should succeed with valid URI"
        );
    }

    #[test]
    fn test_build_endpoint_with_custom_keepalive() {
        let cfg = GrpcClientConfig::new("calculator")
            .with_keepalive(Duration::from_secs(1), Duration::from_millis(500));
        let endpoint = build_endpoint("http://localhost:50051".to_owned(), &cfg).unwrap();
        assert_eq!(endpoint.uri().port_u16(), Some(50051));
    }

    #[test]
    fn test_build_endpoint_empty_uri() {
        let cfg = GrpcClientConfig::default();
        let result = build_endpoint(String::new(), &cfg);
        assert!(result.is_err(), "build_endpoint should fail with empty URI");
    }

    #[tokio::test]
    async fn test_connect_channel_fails_without_server() {
        let cfg = GrpcClientConfig::new("test").with_connect_timeout(Duration::from_millis(100));
        let result = connect_channel("http://127.0.0.1:1".to_owned(), &cfg).await;
        assert!(result.is_err(), "nothing listens on port 1");
    }
}

//! Listener binding and the tonic serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

use calculator_sdk::{CalculatorServiceServer, FILE_DESCRIPTOR_SET, SERVICE_NAME};

use crate::api::grpc::CalculatorServiceImpl;
use crate::domain::Service;

/// Bind a TCP listener on `listen_addr`.
///
/// # Errors
/// Returns an error if the address does not parse or cannot be bound.
pub async fn bind(listen_addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{listen_addr}'"))?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind gRPC listener at '{addr}'"))
}

/// Serve `CalculatorService` and gRPC reflection on `listener` until `cancel` fires.
///
/// # Errors
/// Returns an error if the listener address is unavailable, the reflection
/// service cannot be built, or the server fails.
pub async fn serve(listener: TcpListener, cancel: CancellationToken) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, service = SERVICE_NAME, "calculator gRPC server listening");

    let svc = CalculatorServiceServer::new(CalculatorServiceImpl::new(Arc::new(Service::new())));
    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()
        .context("failed to build reflection service")?;

    Server::builder()
        .add_service(svc)
        .add_service(reflection)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            cancel.cancelled().await;
            tracing::info!("calculator gRPC server shutting down");
        })
        .await
        .context("gRPC server error")?;

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_rejects_malformed_address() {
        let err = bind("localhost").await.unwrap_err();
        assert!(err.to_string().contains("invalid listen address"));
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(serve(listener, cancel.clone()));
        cancel.cancel();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server should stop promptly")
            .expect("server task should not panic");
        assert!(result.is_ok());
    }
}

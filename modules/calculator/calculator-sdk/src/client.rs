//! gRPC client implementation of `CalculatorClient`

use async_trait::async_trait;
use tonic::transport::Channel;

use crate::api::{CalculatorClient, CalculatorError};
use crate::proto::calculator_service_client::CalculatorServiceClient;
use crate::proto::{CalculationReply, CalculationRequest};
use crate::transport::{GrpcClientConfig, build_endpoint, connect_channel};

/// gRPC client implementation of `CalculatorClient`.
///
/// Cheap to clone; clones share the underlying channel.
#[derive(Clone)]
pub struct CalculatorGrpcClient {
    inner: CalculatorServiceClient<Channel>,
}

impl CalculatorGrpcClient {
    /// Connect to the `CalculatorService`, failing if the server is unreachable.
    ///
    /// # Errors
    /// Returns [`CalculatorError::RemoteFailure`] if the URI is malformed or
    /// the connection cannot be established.
    pub async fn connect(
        uri: impl Into<String>,
        cfg: &GrpcClientConfig,
    ) -> Result<Self, CalculatorError> {
        let uri = uri.into();
        let channel = connect_channel(uri.clone(), cfg).await.map_err(|e| {
            CalculatorError::RemoteFailure(format!("failed to connect to {uri}: {e}"))
        })?;
        Ok(Self::from(channel))
    }

    /// Build a client whose connection is established on the first call.
    ///
    /// No network I/O happens here.
    ///
    /// # Errors
    /// Returns [`CalculatorError::RemoteFailure`] if the URI is malformed.
    pub fn connect_lazy(
        uri: impl Into<String>,
        cfg: &GrpcClientConfig,
    ) -> Result<Self, CalculatorError> {
        let uri = uri.into();
        let endpoint = build_endpoint(uri.clone(), cfg)
            .map_err(|e| CalculatorError::RemoteFailure(format!("invalid endpoint {uri}: {e}")))?;
        Ok(Self::from(endpoint.connect_lazy()))
    }
}

impl From<Channel> for CalculatorGrpcClient {
    fn from(channel: Channel) -> Self {
        Self {
            inner: CalculatorServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl CalculatorClient for CalculatorGrpcClient {
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationReply, CalculatorError> {
        let mut client = self.inner.clone();

        let response = client.calculate(request).await.map_err(|status| {
            tracing::debug!(
                code = %status.code(),
                message = %status.message(),
                "calculate call failed"
            );
            CalculatorError::from(status)
        })?;

        Ok(response.into_inner())
    }
}

//! gRPC Server implementation for calculator
//!
//! The server implementation handles gRPC requests and delegates
//! to the domain Service for dispatch.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use calculator_sdk::{CalculationReply, CalculationRequest, CalculatorService, ErrorKind};

use crate::domain::{Service, ServiceError};

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        match err.kind() {
            ErrorKind::InvalidArgument => Status::invalid_argument(err.to_string()),
            ErrorKind::InvalidInput | ErrorKind::RemoteFailure => Status::internal(err.to_string()),
        }
    }
}

/// gRPC service implementation that wraps the domain Service.
#[derive(Clone)]
pub struct CalculatorServiceImpl {
    service: Arc<Service>,
}

impl CalculatorServiceImpl {
    /// Create a new `CalculatorService` implementation with the given Service.
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl CalculatorService for CalculatorServiceImpl {
    async fn calculate(
        &self,
        request: Request<CalculationRequest>,
    ) -> Result<Response<CalculationReply>, Status> {
        let req = request.into_inner();

        let reply = self.service.calculate(&req).map_err(|err| {
            tracing::warn!(operator = %req.operator, error = %err, "calculation rejected");
            Status::from(err)
        })?;

        Ok(Response::new(reply))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    async fn call(a: i32, b: i32, operator: &str) -> Result<i32, Status> {
        let svc = CalculatorServiceImpl::new(Arc::new(Service::new()));
        let request = Request::new(CalculationRequest {
            operand_a: a,
            operand_b: b,
            operator: operator.to_owned(),
        });
        svc.calculate(request)
            .await
            .map(|resp| resp.into_inner().result)
    }

    #[tokio::test]
    async fn test_success_reply() {
        assert_eq!(call(6, 3, "divide").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_division_by_zero_status() {
        let status = call(1, 0, "divide").await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "division by zero is not allowed");
    }

    #[test]
    fn test_status_code_follows_error_kind() {
        for err in [
            ServiceError::DivisionByZero,
            ServiceError::InvalidOperator("modulo".to_owned()),
        ] {
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            let message = err.to_string();
            let status = Status::from(err);
            assert_eq!(status.code(), tonic::Code::InvalidArgument);
            assert_eq!(status.message(), message);
        }
    }

    #[tokio::test]
    async fn test_invalid_operator_status() {
        let status = call(1, 0, "invalid").await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "invalid operator: invalid");
    }
}

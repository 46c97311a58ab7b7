//! Domain service for calculator
//!
//! Contains the operation dispatcher.

use calculator_sdk::{CalculationReply, CalculationRequest, ErrorKind, Operator};
use tracing::debug;

/// Error type for dispatcher operations.
///
/// Every variant is an `InvalidArgument` rejection, surfaced as
/// `INVALID_ARGUMENT` with the display text as status message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("division by zero is not allowed")]
    DivisionByZero,

    #[error("invalid operator: {0}")]
    InvalidOperator(String),
}

impl ServiceError {
    /// Error kind reported to callers; the gRPC layer picks the status code from it.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero | Self::InvalidOperator(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Domain service that dispatches one arithmetic operation per request.
///
/// Stateless and reentrant: concurrent calls share nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Service;

impl Service {
    /// Create a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Apply the request's operator to its operands.
    ///
    /// The operator is matched exactly against the registry. Arithmetic wraps
    /// on overflow and division truncates toward zero.
    ///
    /// # Errors
    /// - [`ServiceError::DivisionByZero`] for `divide` with a zero divisor
    /// - [`ServiceError::InvalidOperator`] for any unregistered operator name
    pub fn calculate(&self, request: &CalculationRequest) -> Result<CalculationReply, ServiceError> {
        let a = request.operand_a;
        let b = request.operand_b;

        let Some(operator) = Operator::from_name(&request.operator) else {
            debug!(operator = %request.operator, "rejecting unknown operator");
            return Err(ServiceError::InvalidOperator(request.operator.clone()));
        };

        let result = match operator {
            Operator::Add => a.wrapping_add(b),
            Operator::Subtract => a.wrapping_sub(b),
            Operator::Multiply => a.wrapping_mul(b),
            Operator::Divide => {
                if b == 0 {
                    debug!(a, "rejecting division by zero");
                    return Err(ServiceError::DivisionByZero);
                }
                a.wrapping_div(b)
            }
        };

        debug!(%operator, a, b, result, "performed calculation");
        Ok(CalculationReply { result })
    }
}

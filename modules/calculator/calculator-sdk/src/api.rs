//! Calculator API trait and types
//!
//! Contract trait, operator registry and error types shared by the
//! request issuer and the server-side dispatcher.

use std::fmt;

use async_trait::async_trait;

use crate::proto::{CalculationReply, CalculationRequest};

/// Closed set of operators the calculator understands.
///
/// Both sides resolve operator names through [`Operator::from_name`], so the
/// client's pre-flight check and the server's dispatch always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Every registered operator, in wire-name order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Look up an operator by its exact (case-sensitive) wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable classification of a [`CalculatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected by the issuer before any network I/O.
    InvalidInput,
    /// Rejected by the server-side dispatcher.
    InvalidArgument,
    /// Transport failure or an unclassified remote error.
    RemoteFailure,
}

/// Error type for calculator operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("remote failure: {0}")]
    RemoteFailure(String),
}

impl CalculatorError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::RemoteFailure(_) => ErrorKind::RemoteFailure,
        }
    }

    /// Human-readable message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(msg) | Self::InvalidArgument(msg) | Self::RemoteFailure(msg) => msg,
        }
    }
}

impl From<tonic::Status> for CalculatorError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::InvalidArgument => Self::InvalidArgument(status.message().to_owned()),
            code => Self::RemoteFailure(format!("{}: {}", code.description(), status.message())),
        }
    }
}

/// Calculator API trait
///
/// One unary call per invocation. Implementations must not retry.
#[async_trait]
pub trait CalculatorClient: Send + Sync {
    /// Submit one calculation and return the server's reply.
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationReply, CalculatorError>;
}

//! Client-side request issuer.
//!
//! Validates caller-supplied arguments, builds exactly one
//! `CalculationRequest` and submits it through a [`CalculatorClient`].
//! Validation failures never reach the network.

use tracing::debug;

use crate::api::{CalculatorClient, CalculatorError, Operator};
use crate::proto::CalculationRequest;

const INVALID_METHOD_MSG: &str =
    "Invalid or missing method. Use one of: add, subtract, multiply, divide";
const MISSING_OPERAND_MSG: &str = "Missing operand. Both operands (a and b) are required";

/// Raw arguments as supplied by an external caller.
///
/// `None` means the argument was not supplied at all, which is different
/// from an operand explicitly set to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationArgs {
    pub method: Option<String>,
    pub a: Option<i32>,
    pub b: Option<i32>,
}

impl CalculationArgs {
    #[must_use]
    pub fn new(method: Option<String>, a: Option<i32>, b: Option<i32>) -> Self {
        Self { method, a, b }
    }

    /// Validate the arguments and build the wire request.
    ///
    /// The method name is lowercased before the registry lookup.
    ///
    /// # Errors
    /// Returns [`CalculatorError::InvalidInput`] if the method is missing or
    /// unknown, or if either operand is missing.
    pub fn into_request(self) -> Result<CalculationRequest, CalculatorError> {
        let operator = self
            .method
            .as_deref()
            .map(str::to_lowercase)
            .and_then(|name| Operator::from_name(&name))
            .ok_or_else(|| CalculatorError::InvalidInput(INVALID_METHOD_MSG.to_owned()))?;

        let (Some(operand_a), Some(operand_b)) = (self.a, self.b) else {
            return Err(CalculatorError::InvalidInput(MISSING_OPERAND_MSG.to_owned()));
        };

        Ok(CalculationRequest {
            operand_a,
            operand_b,
            operator: operator.as_str().to_owned(),
        })
    }
}

/// Validate `args`, submit one calculation and return its result.
///
/// # Errors
/// - [`CalculatorError::InvalidInput`] when validation fails (no call is made)
/// - [`CalculatorError::InvalidArgument`] when the server rejects the request
/// - [`CalculatorError::RemoteFailure`] on transport or unclassified errors
pub async fn issue<C>(client: &C, args: CalculationArgs) -> Result<i32, CalculatorError>
where
    C: CalculatorClient + ?Sized,
{
    let request = args.into_request()?;
    debug!(
        operator = %request.operator,
        operand_a = request.operand_a,
        operand_b = request.operand_b,
        "issuing calculation"
    );

    let reply = client.calculate(request).await?;
    Ok(reply.result)
}

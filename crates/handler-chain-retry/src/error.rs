//! The error the retry wrapper surfaces once its budget is exhausted.

use handler_chain_core::HandlerError;

/// Raised when a retry-wrapped destination call fails on every attempt.
///
/// The message is fixed; `cause` is always the last underlying error
/// observed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to execute destination after retries")]
pub struct RetryExhaustedError {
    pub cause: HandlerError,
}

impl RetryExhaustedError {
    pub fn new(cause: HandlerError) -> Self {
        Self { cause }
    }
}

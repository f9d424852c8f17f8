//! Error type raised by the durable store collaborator.

/// Errors raised by a [`crate::DurableStore`] implementation.
///
/// Per the chain's failure-store write policy, these are logged by the
/// caller and never propagated upward as the business failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backing store rejected or failed to complete the operation.
    #[error("store operation failed: {0}")]
    OperationFailed(String),
    /// `acknowledge` was called with an envelope id the store does not
    /// recognize as in-flight.
    #[error("unknown envelope id: {0}")]
    UnknownEnvelope(String),
}

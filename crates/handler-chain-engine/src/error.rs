//! Construction-time and stage-level error taxonomy.

use handler_chain_core::HandlerError;

/// Raised by `HandlerChain::builder().build()`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigurationError {
    #[error("handler chain name must not be empty")]
    EmptyName,
    #[error("handler chain must have at least one processor")]
    EmptyProcessors,
    #[error("handler chain must have at least one destination")]
    EmptyDestinations,
    #[error("handler chain must have a failure store configured")]
    MissingFailureStore,
    #[error("failed to start replay listener: {0}")]
    ListenerStartFailed(String),
}

/// Wraps the user error returned by a processor.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to execute processor: {processor_id} - {underlying}")]
pub struct ProcessorError {
    pub processor_id: String,
    pub underlying: HandlerError,
}

impl ProcessorError {
    pub fn new(processor_id: impl Into<String>, underlying: HandlerError) -> Self {
        Self {
            processor_id: processor_id.into(),
            underlying,
        }
    }
}

/// Wraps the user error(s) from one or more failed destinations. Produced by
/// the destination stage to build the top-level error string; per-destination
/// snapshots are recorded independently in `Message::destination_errors`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DestinationError {
    #[error("Failed to execute destination: {destination_id} - {underlying}")]
    Single {
        destination_id: String,
        underlying: HandlerError,
    },
    #[error("Failed to execute destinations: {}", .destination_ids.join(", "))]
    Multiple { destination_ids: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processor_error_formats_with_id_and_underlying_message() {
        let err = ProcessorError::new("approve_order", HandlerError::new("Order amount exceeds limit"));
        assert_eq!(
            err.to_string(),
            "Failed to execute processor: approve_order - Order amount exceeds limit"
        );
    }

    #[test]
    fn destination_error_single_formats_with_id() {
        let err = DestinationError::Single {
            destination_id: "d".to_string(),
            underlying: HandlerError::new("boom"),
        };
        assert_eq!(err.to_string(), "Failed to execute destination: d - boom");
    }

    #[test]
    fn destination_error_multiple_joins_ids_in_order() {
        let err = DestinationError::Multiple {
            destination_ids: vec!["d3".to_string(), "d4".to_string()],
        };
        assert_eq!(err.to_string(), "Failed to execute destinations: d3, d4");
    }
}

//! Events emitted by the retry wrapper.

use handler_chain_core::ChainEvent;
use std::time::Instant;

/// Events emitted by the retry wrapper around a destination.
#[derive(Debug, Clone)]
pub enum RetryEvent {
    /// An attempt failed and another attempt will follow after a sleep.
    Attempt {
        chain_name: String,
        timestamp: Instant,
        destination_id: String,
        attempt: u32,
    },
    /// The destination eventually succeeded, possibly after retries.
    Success {
        chain_name: String,
        timestamp: Instant,
        destination_id: String,
        attempts: u32,
    },
    /// Every attempt failed; the retry budget is exhausted.
    Exhausted {
        chain_name: String,
        timestamp: Instant,
        destination_id: String,
        attempts: u32,
    },
}

impl ChainEvent for RetryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RetryEvent::Attempt { .. } => "destination_retry_attempt",
            RetryEvent::Success { .. } => "destination_retry_success",
            RetryEvent::Exhausted { .. } => "destination_retry_exhausted",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RetryEvent::Attempt { timestamp, .. }
            | RetryEvent::Success { timestamp, .. }
            | RetryEvent::Exhausted { timestamp, .. } => *timestamp,
        }
    }

    fn chain_name(&self) -> &str {
        match self {
            RetryEvent::Attempt { chain_name, .. }
            | RetryEvent::Success { chain_name, .. }
            | RetryEvent::Exhausted { chain_name, .. } => chain_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_are_distinct() {
        let now = Instant::now();
        let attempt = RetryEvent::Attempt {
            chain_name: "orders".to_string(),
            timestamp: now,
            destination_id: "d".to_string(),
            attempt: 1,
        };
        assert_eq!(attempt.event_type(), "destination_retry_attempt");
        assert_eq!(attempt.chain_name(), "orders");
    }
}

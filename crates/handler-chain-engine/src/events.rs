//! Execution-level observability events emitted by a `HandlerChain`.

use handler_chain_core::ChainEvent;
use std::time::Instant;

/// Events emitted around a single `execute`/`replay` traversal.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    /// A processor raised an error; the traversal fails fast.
    ProcessorFailed {
        chain_name: String,
        timestamp: Instant,
        processor_id: String,
    },
    /// A filter dropped the message.
    FilteredOut {
        chain_name: String,
        timestamp: Instant,
        processor_id: String,
    },
    /// The destination stage completed; `failed` is the number of
    /// destinations that did not deliver.
    DestinationsCompleted {
        chain_name: String,
        timestamp: Instant,
        succeeded: usize,
        failed: usize,
    },
    /// The failure-store write for this traversal's snapshot failed. Per
    /// logged only; never masks the business result.
    FailureStoreWriteFailed {
        chain_name: String,
        timestamp: Instant,
        detail: String,
    },
}

impl ChainEvent for ExecutionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ExecutionEvent::ProcessorFailed { .. } => "processor_failed",
            ExecutionEvent::FilteredOut { .. } => "filtered_out",
            ExecutionEvent::DestinationsCompleted { .. } => "destinations_completed",
            ExecutionEvent::FailureStoreWriteFailed { .. } => "failure_store_write_failed",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            ExecutionEvent::ProcessorFailed { timestamp, .. }
            | ExecutionEvent::FilteredOut { timestamp, .. }
            | ExecutionEvent::DestinationsCompleted { timestamp, .. }
            | ExecutionEvent::FailureStoreWriteFailed { timestamp, .. } => *timestamp,
        }
    }

    fn chain_name(&self) -> &str {
        match self {
            ExecutionEvent::ProcessorFailed { chain_name, .. }
            | ExecutionEvent::FilteredOut { chain_name, .. }
            | ExecutionEvent::DestinationsCompleted { chain_name, .. }
            | ExecutionEvent::FailureStoreWriteFailed { chain_name, .. } => chain_name,
        }
    }
}

//! The result types returned by `execute` and `replay`.

use crate::message::Message;
use indexmap::IndexMap;

use crate::value::Value;

/// Returned on a successful traversal: either every effective destination
/// delivered, or the processor stage dropped the message via a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSuccess {
    pub message: Message,
    pub destination_results: IndexMap<String, Value>,
}

/// Returned when the processor stage errors or one or more destinations
/// fail terminally. `message` is the exact snapshot persisted to the
/// failure store.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionError {
    pub message: Message,
    pub error: String,
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ExecutionError {}

pub type ExecutionResult = Result<ExecutionSuccess, ExecutionError>;

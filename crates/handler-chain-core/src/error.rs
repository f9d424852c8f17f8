//! Shared error types for handler-chain crates.
//!
//! Individual crates (`handler-chain-engine`, `handler-chain-retry`,
//! `handler-chain-store`) define their own narrow error enums for
//! construction-time and operational failures. This module holds the error
//! shape that crosses crate boundaries: the error a user-supplied processor
//! or destination returns, including the fixed form a caught handler panic
//! is converted into.

use crate::value::Value;
use std::fmt;

/// The error a processor or destination callable returns.
///
/// This is deliberately not an open trait object: handlers are plain
/// closures and the engine needs to snapshot their failure (message plus an
/// arbitrary detail payload) onto the `Message` record, so a concrete,
/// cloneable shape is more useful here than `Box<dyn Error>`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    pub message: String,
    pub detail: Option<Value>,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: Value) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail),
        }
    }

    /// Builds the error a caught handler panic is surfaced as. The message
    /// is fixed per the panic-handling contract; the original panic payload,
    /// when readable as a string, becomes the detail.
    pub fn aborted(panic_message: impl fmt::Display) -> Self {
        Self {
            message: "handler aborted".to_string(),
            detail: Some(Value::String(panic_message.to_string())),
        }
    }
}

/// Extracts a human-readable message from a `std::panic::catch_unwind`
/// payload. Panics typically carry a `&'static str` or `String`; anything
/// else is reported generically.
pub fn describe_panic(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//! Fixed-interval retry wrapper for handler-chain destinations.
//!
//! Narrowed, on purpose, from a general-purpose retry middleware down to a
//! single contract: invoke, and on error retry up to a fixed count with a
//! fixed sleep between attempts. There is no exponential backoff, no retry
//! budget, and no per-request attempt count — a destination either has a
//! `RetryConfig` or it doesn't.
//!
//! # Examples
//!
//! ```
//! use handler_chain_core::{EventListeners, HandlerError};
//! use handler_chain_retry::{with_retry, RetryConfig};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let listeners = EventListeners::new();
//! let config = RetryConfig::new(2, Duration::from_millis(10));
//!
//! let result: Result<&str, _> = with_retry(Some(config), "orders", "add", &listeners, || async {
//!     Ok("ok")
//! })
//! .await;
//! assert_eq!(result.unwrap(), "ok");
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod retry;

pub use config::{RetryConfig, RetryConfigBuilder};
pub use error::RetryExhaustedError;
pub use events::RetryEvent;
pub use retry::with_retry;

//! Errors surfaced by the replay listener.

use thiserror::Error;

/// Failure starting or running a [`crate::ReplayListener`].
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay listener is already running")]
    AlreadyRunning,
}

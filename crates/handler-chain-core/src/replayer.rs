//! The interface a replay listener drives, implemented by the handler chain
//! that owns it.
//!
//! Kept in this crate (rather than on the concrete `HandlerChain` type in
//! `handler-chain-engine`) so `handler-chain-replay` can depend on
//! `handler-chain-core` alone without a cycle back to the engine crate that
//! constructs and starts it.

use crate::message::Message;
use crate::outcome::ExecutionResult;
use futures::future::BoxFuture;

/// Anything that can re-drive a persisted [`Message`] through a pipeline.
pub trait Replayer: Send + Sync {
    /// Replays `message` through the pipeline, honoring its skip list.
    /// Must not write to any failure store on error; the caller owns that
    /// decision.
    fn replay(&self, message: Message) -> BoxFuture<'_, ExecutionResult>;

    /// The name of the chain being replayed, for logging and events.
    fn name(&self) -> &str;
}

//! The durable store capability the engine and replay listener depend on.

use crate::envelope::Envelope;
use crate::error::StoreError;
use handler_chain_core::Message;

/// A durable queue with `store` / `retrieve` / `acknowledge` semantics.
///
/// Implementations must be internally thread-safe: the engine calls this
/// from multiple destination tasks and the replay listener's background
/// task concurrently. Methods are plain `async fn` — native async-in-trait
/// is sufficient here, there is no need to box a trait object future by
/// hand or reach for `async-trait`.
pub trait DurableStore: Send + Sync {
    /// Appends `message` as a new envelope.
    async fn store(&self, message: Message) -> Result<(), StoreError>;

    /// Returns the next available envelope, marking it in-flight, or `None`
    /// if the store is empty.
    async fn retrieve(&self) -> Result<Option<Envelope>, StoreError>;

    /// Resolves an in-flight envelope. `success = true` removes it
    /// permanently; `success = false` releases the in-flight flag so it can
    /// be redelivered by a later `retrieve`.
    async fn acknowledge(&self, envelope_id: &str, success: bool) -> Result<(), StoreError>;
}

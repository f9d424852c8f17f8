//! The unit of work a [`crate::DurableStore`] hands back from `retrieve`.

use handler_chain_core::Message;

/// An in-flight unit retrieved from a store. `id` is the store's own
/// envelope identifier, distinct from the wrapped `Message::id` (a message
/// can be stored, retried, and redelivered under the same envelope id).
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub id: String,
    pub payload: Message,
}

impl Envelope {
    pub fn new(id: impl Into<String>, payload: Message) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

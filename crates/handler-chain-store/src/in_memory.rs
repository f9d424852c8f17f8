//! An in-memory `DurableStore`, used across the workspace's tests and
//! examples. Not a production backend — see the crate's top-level docs.

use crate::envelope::Envelope;
use crate::error::StoreError;
use crate::store::DurableStore;
use handler_chain_core::Message;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    pending: VecDeque<Envelope>,
    in_flight: Vec<Envelope>,
}

/// A `Mutex`-guarded `VecDeque` standing in for a real durable queue.
/// `retrieve` moves an envelope from `pending` into `in_flight`;
/// `acknowledge(success = false)` moves it back to the tail of `pending`
/// for redelivery.
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Number of envelopes waiting to be retrieved (test/diagnostic helper).
    pub async fn pending_len(&self) -> usize {
        self.state.lock().await.pending.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableStore for InMemoryStore {
    async fn store(&self, message: Message) -> Result<(), StoreError> {
        let envelope = Envelope::new(Uuid::new_v4().to_string(), message);
        self.state.lock().await.pending.push_back(envelope);
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<Envelope>, StoreError> {
        let mut state = self.state.lock().await;
        let Some(envelope) = state.pending.pop_front() else {
            return Ok(None);
        };
        state.in_flight.push(envelope.clone());
        Ok(Some(envelope))
    }

    async fn acknowledge(&self, envelope_id: &str, success: bool) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let position = state
            .in_flight
            .iter()
            .position(|e| e.id == envelope_id)
            .ok_or_else(|| StoreError::UnknownEnvelope(envelope_id.to_string()))?;
        let envelope = state.in_flight.remove(position);
        if !success {
            state.pending.push_back(envelope);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(id: &str) -> Message {
        Message::new(id, "orders", json!({"ok": true}))
    }

    #[tokio::test]
    async fn retrieve_returns_none_when_empty() {
        let store = InMemoryStore::new();
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_then_retrieve_round_trips_the_message() {
        let store = InMemoryStore::new();
        store.store(message("m1")).await.unwrap();

        let envelope = store.retrieve().await.unwrap().unwrap();
        assert_eq!(envelope.payload.id, "m1");
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn acknowledge_success_removes_it_permanently() {
        let store = InMemoryStore::new();
        store.store(message("m1")).await.unwrap();
        let envelope = store.retrieve().await.unwrap().unwrap();

        store.acknowledge(&envelope.id, true).await.unwrap();
        assert_eq!(store.pending_len().await, 0);
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn acknowledge_failure_redelivers_the_envelope() {
        let store = InMemoryStore::new();
        store.store(message("m1")).await.unwrap();
        let envelope = store.retrieve().await.unwrap().unwrap();

        store.acknowledge(&envelope.id, false).await.unwrap();
        assert_eq!(store.pending_len().await, 1);

        let redelivered = store.retrieve().await.unwrap().unwrap();
        assert_eq!(redelivered.payload.id, "m1");
    }

    #[tokio::test]
    async fn acknowledge_unknown_envelope_is_an_error() {
        let store = InMemoryStore::new();
        let err = store.acknowledge("nonexistent", true).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownEnvelope(id) if id == "nonexistent"));
    }
}

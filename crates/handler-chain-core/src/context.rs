//! The mutable in-memory wrapper around a [`Message`] used for one pipeline
//! traversal.

use crate::message::Message;
use crate::value::{self, ConversionError, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A mutable cell wrapping a [`Message`] for the duration of one execute or
/// replay traversal. `id` and `handler_chain_name` are fixed at construction;
/// everything else mutates as processors and destinations run.
///
/// Cloning is a deep copy: the derived [`Clone`] walks every owned field,
/// so mutating a clone's content or properties never touches the original.
#[derive(Debug, Clone)]
pub struct MessageContext {
    message: Message,
}

impl MessageContext {
    /// Wraps a fresh `Message` for a new traversal (ingress or replay).
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    pub fn get_id(&self) -> &str {
        &self.message.id
    }

    pub fn get_handler_chain_name(&self) -> &str {
        &self.message.handler_chain_name
    }

    /// Returns a deep clone of the current content.
    pub fn get_content(&self) -> Value {
        self.message.content.clone()
    }

    /// Decodes the current content into `T`, surfacing [`ConversionError`]
    /// with the fixed message when the content cannot be adapted.
    pub fn get_content_with_type<T: DeserializeOwned>(&self) -> Result<T, ConversionError> {
        value::from_value(&self.message.content)
    }

    /// Replaces the current content. Accepted by deep clone of `content`.
    pub fn set_content(&mut self, content: Value) {
        self.message.content = content;
    }

    /// Sets a property by deep clone.
    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.message.properties.insert(key.into(), value);
    }

    /// Returns a deep clone of a property's value, if present.
    pub fn get_property(&self, key: &str) -> Option<Value> {
        self.message.properties.get(key).cloned()
    }

    /// Decodes a property into `T`, surfacing [`ConversionError`] with the
    /// fixed message when absent or not adaptable.
    pub fn get_property_with_type<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<T, ConversionError> {
        let raw = self.message.properties.get(key).ok_or(ConversionError)?;
        value::from_value(raw)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.message.properties.contains_key(key)
    }

    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.message.properties.shift_remove(key)
    }

    /// Stores a typed value as a property, encoding it through [`Value`].
    pub fn set_property_typed<T: Serialize>(&mut self, key: impl Into<String>, value: &T) {
        self.set_property(key, value::to_value(value));
    }

    pub fn is_destination_skipped(&self, destination_id: &str) -> bool {
        self.message.is_destination_skipped(destination_id)
    }

    pub fn mark_destination_skipped(&mut self, destination_id: &str) {
        self.message.mark_destination_skipped(destination_id);
    }

    /// Attaches a processor/destination failure snapshot onto this context's
    /// underlying message. Used on the orchestrator's private snapshot copy,
    /// never on the live context handlers operate on.
    pub fn set_error(&mut self, error_msg: impl Into<String>, detail: Option<Value>) {
        self.message.error_msg = Some(error_msg.into());
        self.message.error_details = detail;
    }

    pub fn set_error_stack_trace(&mut self, stack_trace: impl Into<String>) {
        self.message.error_stack_trace = Some(stack_trace.into());
    }

    /// Clears error fields and destination results ahead of a replay attempt
    /// preserving `destinationsToSkip` and every other field.
    pub fn clean_for_replay(&mut self) {
        self.message.clean_for_replay();
    }

    /// Converts the context into its durable record, i.e. the `Message` that
    /// is persisted to a store or returned in an execution result.
    pub fn to_record(&self) -> Message {
        self.message.clone()
    }

    /// Consumes the context, returning its underlying message without a copy.
    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> MessageContext {
        MessageContext::new(Message::new("m1", "orders", json!({"amount": 10})))
    }

    #[test]
    fn deep_clone_isolates_content_mutation() {
        let original = context();
        let mut clone = original.clone();
        clone.set_content(json!({"amount": 999}));

        assert_eq!(original.get_content(), json!({"amount": 10}));
        assert_eq!(clone.get_content(), json!({"amount": 999}));
    }

    #[test]
    fn deep_clone_isolates_property_mutation() {
        let mut original = context();
        original.set_property("x", json!(1));

        let mut clone = original.clone();
        clone.set_property("x", json!(2));

        assert_eq!(original.get_property("x"), Some(json!(1)));
        assert_eq!(clone.get_property("x"), Some(json!(2)));
    }

    #[test]
    fn get_content_with_type_converts_or_reports_fixed_error() {
        let ctx = MessageContext::new(Message::new("m1", "orders", json!(42)));
        let value: i64 = ctx.get_content_with_type().unwrap();
        assert_eq!(value, 42);

        let ctx = MessageContext::new(Message::new("m1", "orders", json!("not a number")));
        let err = ctx.get_content_with_type::<i64>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to convert value to the specified type"
        );
    }

    #[test]
    fn get_property_with_type_reports_fixed_error_when_absent() {
        let ctx = context();
        let err = ctx.get_property_with_type::<i64>("missing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to convert value to the specified type"
        );
    }

    #[test]
    fn clean_for_replay_preserves_id_and_skip_list() {
        let mut ctx = context();
        ctx.mark_destination_skipped("d1");
        ctx.set_error("boom", Some(json!({"why": "boom"})));

        ctx.clean_for_replay();

        assert_eq!(ctx.get_id(), "m1");
        assert!(ctx.is_destination_skipped("d1"));
        assert_eq!(ctx.message().error_msg, None);
    }

    #[test]
    fn has_property_and_remove_property() {
        let mut ctx = context();
        assert!(!ctx.has_property("x"));
        ctx.set_property("x", json!(1));
        assert!(ctx.has_property("x"));
        assert_eq!(ctx.remove_property("x"), Some(json!(1)));
        assert!(!ctx.has_property("x"));
    }
}

//! The serializable record that survives failure and replay.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A snapshot of the most recent failure affecting a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cause: Option<Box<ErrorInfo>>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: None,
            detail: None,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ErrorInfo) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_detail_opt(mut self, detail: Option<Value>) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// The skip list and any other durable bookkeeping carried alongside a
/// message across replays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    /// Destination ids known to have already succeeded for this message id.
    #[serde(default)]
    pub destinations_to_skip: Vec<String>,
}

/// The serializable unit that survives failure and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub handler_chain_name: String,
    pub content: Value,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    #[serde(default)]
    pub metadata: MessageMetadata,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_details: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub destination_errors: IndexMap<String, ErrorInfo>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub destination_results: IndexMap<String, Value>,
}

impl Message {
    /// Builds a fresh message for ingress: empty properties, empty metadata,
    /// no error snapshot.
    pub fn new(id: impl Into<String>, handler_chain_name: impl Into<String>, content: Value) -> Self {
        Self {
            id: id.into(),
            handler_chain_name: handler_chain_name.into(),
            content,
            properties: IndexMap::new(),
            metadata: MessageMetadata::default(),
            error_msg: None,
            error_stack_trace: None,
            error_details: None,
            destination_errors: IndexMap::new(),
            destination_results: IndexMap::new(),
        }
    }

    /// Clears the error snapshot and destination results ahead of a replay
    /// attempt: error fields
    /// become absent, `destination_results` becomes empty, `destinations_to_skip`
    /// and every other field are left untouched.
    pub fn clean_for_replay(&mut self) {
        self.error_msg = None;
        self.error_stack_trace = None;
        self.error_details = None;
        self.destination_errors.clear();
        self.destination_results.clear();
    }

    /// True once a destination id has been recorded as already delivered.
    pub fn is_destination_skipped(&self, destination_id: &str) -> bool {
        self.metadata
            .destinations_to_skip
            .iter()
            .any(|id| id == destination_id)
    }

    /// Records a destination as successfully delivered, idempotently.
    pub fn mark_destination_skipped(&mut self, destination_id: &str) {
        if !self.is_destination_skipped(destination_id) {
            self.metadata
                .destinations_to_skip
                .push(destination_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_for_replay_zeroes_error_fields_and_preserves_skip_list() {
        let mut message = Message::new("m1", "orders", json!({"a": 1}));
        message.properties.insert("k".to_string(), json!("v"));
        message.mark_destination_skipped("d1");
        message.error_msg = Some("boom".to_string());
        message.error_stack_trace = Some("trace".to_string());
        message.error_details = Some(json!({"why": "boom"}));
        message
            .destination_errors
            .insert("d2".to_string(), ErrorInfo::new("boom"));
        message
            .destination_results
            .insert("d1".to_string(), json!("ok"));

        message.clean_for_replay();

        assert_eq!(message.error_msg, None);
        assert_eq!(message.error_stack_trace, None);
        assert_eq!(message.error_details, None);
        assert!(message.destination_errors.is_empty());
        assert!(message.destination_results.is_empty());
        assert_eq!(message.id, "m1");
        assert_eq!(message.handler_chain_name, "orders");
        assert_eq!(message.content, json!({"a": 1}));
        assert_eq!(message.properties.get("k"), Some(&json!("v")));
        assert_eq!(message.metadata.destinations_to_skip, vec!["d1".to_string()]);
    }

    #[test]
    fn mark_destination_skipped_is_idempotent() {
        let mut message = Message::new("m1", "orders", Value::Null);
        message.mark_destination_skipped("d1");
        message.mark_destination_skipped("d1");
        assert_eq!(message.metadata.destinations_to_skip, vec!["d1".to_string()]);
    }

    #[test]
    fn optional_fields_absent_when_unset_on_the_wire() {
        let message = Message::new("m1", "orders", json!(null));
        let encoded = serde_json::to_value(&message).unwrap();
        let obj = encoded.as_object().unwrap();
        assert!(!obj.contains_key("errorMsg"));
        assert!(!obj.contains_key("destinationErrors"));
        assert!(!obj.contains_key("destinationResults"));
        assert!(obj.contains_key("handlerChainName"));
    }
}

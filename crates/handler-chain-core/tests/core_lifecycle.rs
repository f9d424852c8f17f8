//! Message / MessageContext lifecycle tests.
//!
//! Tests for the data model's lifecycle contract including:
//! - Deep-clone isolation of content and properties
//! - `clean_for_replay` zeroing error fields while preserving the skip list
//! - Stable `id` / `handlerChainName` across mutation
//! - Wire format field naming

use handler_chain_core::{Message, MessageContext};
use serde_json::json;

#[test]
fn cloning_a_context_is_a_deep_copy() {
    let original = MessageContext::new(Message::new("m1", "orders", json!({"amount": 10})));
    let mut clone = original.clone();

    clone.set_content(json!({"amount": 20}));
    clone.set_property("status", json!("APPROVED"));

    assert_eq!(original.get_content(), json!({"amount": 10}));
    assert_eq!(original.get_property("status"), None);
}

#[test]
fn id_and_chain_name_survive_mutation() {
    let mut ctx = MessageContext::new(Message::new("m1", "orders", json!(null)));
    ctx.set_content(json!(42));
    ctx.set_property("x", json!(1));
    ctx.mark_destination_skipped("d1");

    assert_eq!(ctx.get_id(), "m1");
    assert_eq!(ctx.get_handler_chain_name(), "orders");
}

#[test]
fn clean_for_replay_zeroes_errors_but_keeps_skip_list_and_content() {
    let mut ctx = MessageContext::new(Message::new("m1", "orders", json!({"amount": 10})));
    ctx.set_property("region", json!("us-east"));
    ctx.mark_destination_skipped("d1");
    ctx.mark_destination_skipped("d2");
    ctx.set_error("boom", Some(json!({"detail": "boom"})));
    ctx.set_error_stack_trace("at line 1");

    ctx.clean_for_replay();

    let record = ctx.to_record();
    assert_eq!(record.error_msg, None);
    assert_eq!(record.error_stack_trace, None);
    assert_eq!(record.error_details, None);
    assert!(record.destination_errors.is_empty());
    assert!(record.destination_results.is_empty());
    assert_eq!(
        record.metadata.destinations_to_skip,
        vec!["d1".to_string(), "d2".to_string()]
    );
    assert_eq!(record.content, json!({"amount": 10}));
    assert_eq!(record.properties.get("region"), Some(&json!("us-east")));
}

#[test]
fn replay_is_a_no_op_when_every_destination_already_skipped() {
    let mut message = Message::new("m1", "orders", json!({"amount": 10}));
    message.mark_destination_skipped("d1");
    let ctx = MessageContext::new(message);

    assert!(ctx.is_destination_skipped("d1"));
    assert!(!ctx.is_destination_skipped("d2"));
}

#[test]
fn message_record_field_names_match_the_documented_wire_format() {
    let mut message = Message::new("m1", "orders", json!(1));
    message.mark_destination_skipped("d1");

    let encoded = serde_json::to_value(&message).unwrap();
    let obj = encoded.as_object().unwrap();

    assert!(obj.contains_key("id"));
    assert!(obj.contains_key("handlerChainName"));
    assert!(obj.contains_key("content"));
    assert!(obj.contains_key("properties"));
    assert!(obj.contains_key("metadata"));
    assert_eq!(obj["metadata"]["destinationsToSkip"], json!(["d1"]));
    assert!(
        !obj.contains_key("errorMsg"),
        "unset optional fields must be absent"
    );
}

//! Parallel destination fan-out with per-destination retry.

use crate::destination::Destination;
use crate::error::DestinationError;
use handler_chain_core::{describe_panic, ErrorInfo, HandlerError, MessageContext};
use handler_chain_retry::{with_retry, RetryEvent};
use indexmap::IndexMap;
use std::panic::AssertUnwindSafe;

/// Output of running every effective destination to completion.
pub struct DestinationStageOutcome {
    pub successes: IndexMap<String, handler_chain_core::Value>,
    pub failures: IndexMap<String, ErrorInfo>,
}

/// Runs every destination not already in the context's skip list,
/// concurrently, each against its own deep clone of `context`. Always waits
/// for every task; never exits early on a failure.
pub async fn run(
    context: &MessageContext,
    destinations: &[Destination],
    chain_name: &str,
    retry_listeners: &handler_chain_core::EventListeners<RetryEvent>,
) -> DestinationStageOutcome {
    let effective: Vec<&Destination> = destinations
        .iter()
        .filter(|d| !context.is_destination_skipped(&d.id))
        .collect();

    let tasks = effective.iter().map(|destination| {
        let destination_context = context.clone();
        let destination = (*destination).clone();
        let chain_name = chain_name.to_string();
        let retry_listeners = retry_listeners.clone();
        async move {
            let id = destination.id.clone();
            let result = invoke_destination(destination, destination_context, &chain_name, &retry_listeners).await;
            (id, result)
        }
    });

    let results = futures::future::join_all(tasks.map(tokio::spawn)).await;

    let mut successes = IndexMap::new();
    let mut failures = IndexMap::new();
    for joined in results {
        match joined {
            Ok((id, Ok(value))) => {
                successes.insert(id, value);
            }
            Ok((id, Err(error_info))) => {
                failures.insert(id, error_info);
            }
            Err(join_err) => {
                // The spawned task itself was aborted/panicked outside the
                // handler's own catch_unwind boundary (e.g. the runtime shut
                // down); surface it as an ordinary destination failure.
                failures.insert(
                    "<unknown>".to_string(),
                    ErrorInfo::new(format!("destination task failed to join: {join_err}")),
                );
            }
        }
    }

    DestinationStageOutcome { successes, failures }
}

async fn invoke_destination(
    destination: Destination,
    destination_context: MessageContext,
    chain_name: &str,
    retry_listeners: &handler_chain_core::EventListeners<RetryEvent>,
) -> Result<handler_chain_core::Value, ErrorInfo> {
    let callable = destination.callable.clone();
    let retry_config = destination.retry_config;
    let destination_id = destination.id.clone();

    let outcome = with_retry(
        retry_config,
        chain_name,
        &destination_id,
        retry_listeners,
        move || {
            let callable = callable.clone();
            let ctx = destination_context.clone();
            invoke(move |ctx| callable(ctx), ctx)
        },
    )
    .await;

    match outcome {
        Ok(value) => Ok(value),
        Err(exhausted) => {
            if retry_config.is_some() {
                Err(ErrorInfo::new(exhausted.to_string())
                    .with_detail_opt(exhausted.cause.detail.clone())
                    .with_cause(
                        ErrorInfo::new(exhausted.cause.message.clone())
                            .with_detail_opt(exhausted.cause.detail.clone()),
                    ))
            } else {
                Err(ErrorInfo::new(exhausted.cause.message)
                    .with_detail_opt(exhausted.cause.detail))
            }
        }
    }
}

async fn invoke<F, Fut>(
    callable: F,
    context: MessageContext,
) -> Result<handler_chain_core::Value, HandlerError>
where
    F: FnOnce(MessageContext) -> Fut,
    Fut: std::future::Future<Output = Result<handler_chain_core::Value, HandlerError>>,
{
    use futures::FutureExt;

    let future = AssertUnwindSafe(callable(context)).catch_unwind();
    match future.await {
        Ok(result) => result,
        Err(panic_payload) => Err(HandlerError::aborted(describe_panic(panic_payload.as_ref()))),
    }
}

/// Builds the top-level error string and classification for a non-empty
/// failure map, per the single-vs-multiple asymmetry below.
pub fn report_failure(failures: &IndexMap<String, ErrorInfo>) -> DestinationError {
    if failures.len() == 1 {
        let (destination_id, info) = failures.first().expect("checked len == 1");
        DestinationError::Single {
            destination_id: destination_id.clone(),
            underlying: HandlerError {
                message: info.message.clone(),
                detail: info.detail.clone(),
            },
        }
    } else {
        DestinationError::Multiple {
            destination_ids: failures.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Destination;
    use handler_chain_core::{EventListeners, Message};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn report_failure_single_preserves_detail() {
        let mut failures = IndexMap::new();
        failures.insert(
            "d1".to_string(),
            ErrorInfo::new("boom").with_detail(json!({"why": "timeout"})),
        );

        let err = report_failure(&failures);
        match err {
            DestinationError::Single { destination_id, underlying } => {
                assert_eq!(destination_id, "d1");
                assert_eq!(underlying.message, "boom");
                assert_eq!(underlying.detail, Some(json!({"why": "timeout"})));
            }
            DestinationError::Multiple { .. } => panic!("expected Single"),
        }
    }

    #[test]
    fn report_failure_multiple_joins_ids_in_insertion_order() {
        let mut failures = IndexMap::new();
        failures.insert("d3".to_string(), ErrorInfo::new("boom3"));
        failures.insert("d4".to_string(), ErrorInfo::new("boom4"));

        let err = report_failure(&failures);
        match err {
            DestinationError::Multiple { destination_ids } => {
                assert_eq!(destination_ids, vec!["d3".to_string(), "d4".to_string()]);
            }
            DestinationError::Single { .. } => panic!("expected Multiple"),
        }
        assert_eq!(err.to_string(), "Failed to execute destinations: d3, d4");
    }

    fn ok_destination(id: &str) -> Destination {
        let id = id.to_string();
        Destination::new(
            id.clone(),
            Arc::new(move |_ctx| {
                let id = id.clone();
                Box::pin(async move { Ok(json!({"sent_to": id})) })
            }),
        )
    }

    fn failing_destination(id: &str) -> Destination {
        let id = id.to_string();
        Destination::new(
            id,
            Arc::new(|_ctx| Box::pin(async move { Err(HandlerError::new("unreachable")) })),
        )
    }

    #[tokio::test]
    async fn run_skips_destinations_already_marked_as_skipped() {
        let mut context = MessageContext::new(Message::new("m1", "orders", json!({"a": 1})));
        context.mark_destination_skipped("already_done");

        let destinations = vec![ok_destination("already_done"), ok_destination("fresh")];
        let listeners = EventListeners::new();

        let outcome = run(&context, &destinations, "orders", &listeners).await;

        assert_eq!(outcome.successes.len(), 1);
        assert!(outcome.successes.contains_key("fresh"));
        assert!(!outcome.successes.contains_key("already_done"));
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn run_reports_every_failing_destination_independently_of_successes() {
        let context = MessageContext::new(Message::new("m1", "orders", json!({"a": 1})));
        let destinations = vec![
            ok_destination("d1"),
            failing_destination("d2"),
            failing_destination("d3"),
        ];
        let listeners = EventListeners::new();

        let outcome = run(&context, &destinations, "orders", &listeners).await;

        assert_eq!(outcome.successes.len(), 1);
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.failures.contains_key("d2"));
        assert!(outcome.failures.contains_key("d3"));
    }
}

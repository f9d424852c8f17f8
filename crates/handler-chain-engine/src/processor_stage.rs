//! Sequential processor evaluation.

use crate::error::ProcessorError;
use crate::processor::Processor;
use handler_chain_core::{describe_panic, HandlerError, MessageContext};
use std::panic::AssertUnwindSafe;

/// Result of running every processor in declaration order.
pub enum ProcessorStageOutcome {
    /// Every processor ran (or a filter gate never rejected); the
    /// destination stage should run next.
    Continue(MessageContext),
    /// A filter returned `false`: no further processors or destinations
    /// run, and the overall result is a success-drop.
    Drop(MessageContext),
}

/// Runs `processors` in order against `context`, stopping at the first
/// error or the first filter that returns `false`.
pub async fn run(
    mut context: MessageContext,
    processors: &[Processor],
) -> Result<ProcessorStageOutcome, ProcessorError> {
    for processor in processors {
        context = match processor {
            Processor::Filter { id, callable } => {
                let callable = callable.clone();
                match invoke(move |ctx| callable(ctx), context).await {
                    Ok((ctx, true)) => ctx,
                    Ok((ctx, false)) => return Ok(ProcessorStageOutcome::Drop(ctx)),
                    Err(err) => return Err(ProcessorError::new(id.clone(), err)),
                }
            }
            Processor::Transformer { id, callable } => {
                let callable = callable.clone();
                match invoke(move |ctx| callable(ctx), context).await {
                    Ok((mut ctx, new_content)) => {
                        ctx.set_content(new_content);
                        ctx
                    }
                    Err(err) => return Err(ProcessorError::new(id.clone(), err)),
                }
            }
            Processor::Generic { id, callable } => {
                let callable = callable.clone();
                match invoke(move |ctx| callable(ctx), context).await {
                    Ok(ctx) => ctx,
                    Err(err) => return Err(ProcessorError::new(id.clone(), err)),
                }
            }
        };
    }
    Ok(ProcessorStageOutcome::Continue(context))
}

/// Runs a processor callable, converting a panic into the fixed
/// `"handler aborted"` error rather than letting it unwind past the stage.
async fn invoke<F, Fut, T>(callable: F, context: MessageContext) -> Result<T, HandlerError>
where
    F: FnOnce(MessageContext) -> Fut,
    Fut: std::future::Future<Output = Result<T, HandlerError>>,
{
    use futures::FutureExt;

    let future = AssertUnwindSafe(callable(context)).catch_unwind();
    match future.await {
        Ok(result) => result,
        Err(panic_payload) => Err(HandlerError::aborted(describe_panic(panic_payload.as_ref()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Processor;
    use handler_chain_core::Message;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx(content: serde_json::Value) -> MessageContext {
        MessageContext::new(Message::new("m1", "orders", content))
    }

    #[tokio::test]
    async fn filter_returning_false_stops_the_chain_with_a_drop_outcome() {
        let filter = Processor::filter(
            "always_false",
            Arc::new(|c: MessageContext| Box::pin(async move { Ok((c, false)) })),
        );
        let never_runs = Processor::generic(
            "never",
            Arc::new(|_c: MessageContext| {
                Box::pin(async move { panic!("must not run after a drop") })
            }),
        );

        let outcome = run(ctx(json!(1)), &[filter, never_runs]).await.unwrap();
        assert!(matches!(outcome, ProcessorStageOutcome::Drop(_)));
    }

    #[tokio::test]
    async fn transformer_replaces_content_for_the_next_processor() {
        let double = Processor::transformer(
            "double",
            Arc::new(|c: MessageContext| {
                Box::pin(async move {
                    let n: i64 = c.get_content_with_type().unwrap();
                    Ok((c, json!(n * 2)))
                })
            }),
        );
        let check = Processor::generic(
            "check",
            Arc::new(|c: MessageContext| {
                Box::pin(async move {
                    let n: i64 = c.get_content_with_type().unwrap();
                    assert_eq!(n, 20);
                    Ok(c)
                })
            }),
        );

        let outcome = run(ctx(json!(10)), &[double, check]).await.unwrap();
        match outcome {
            ProcessorStageOutcome::Continue(ctx) => {
                assert_eq!(ctx.get_content(), json!(20));
            }
            ProcessorStageOutcome::Drop(_) => panic!("expected Continue"),
        }
    }

    #[tokio::test]
    async fn processor_error_is_formatted_with_id_and_underlying_message() {
        let failing = Processor::generic(
            "approve_order",
            Arc::new(|_c: MessageContext| {
                Box::pin(async move { Err(HandlerError::new("Order amount exceeds limit")) })
            }),
        );

        let err = run(ctx(json!(1)), &[failing]).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to execute processor: approve_order - Order amount exceeds limit"
        );
    }

    #[tokio::test]
    async fn a_panicking_processor_is_reported_as_handler_aborted() {
        let panics = Processor::generic(
            "boom",
            Arc::new(|_c: MessageContext| Box::pin(async move { panic!("kaboom") })),
        );

        let err = run(ctx(json!(1)), &[panics]).await.unwrap_err();
        assert_eq!(err.underlying.message, "handler aborted");
    }
}

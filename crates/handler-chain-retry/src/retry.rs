//! The retry wrapper itself: invoke, sleep between failures, give up.

use crate::config::RetryConfig;
use crate::error::RetryExhaustedError;
use crate::events::RetryEvent;
use handler_chain_core::{EventListeners, HandlerError};
use std::future::Future;
use std::time::Instant;

/// Invokes `operation` up to `config.total_attempts()` times (or once, if
/// `config` is `None`), sleeping `retry_interval` between attempts but never
/// after the last. Returns the first success, or [`RetryExhaustedError`]
/// carrying the last underlying error once the budget is exhausted.
///
/// A destination that errors on the first `k <= max_retries` attempts and
/// succeeds on attempt `k+1` produces one recorded success and exactly `k`
/// sleeps.
pub async fn with_retry<F, Fut, T>(
    config: Option<RetryConfig>,
    chain_name: &str,
    destination_id: &str,
    listeners: &EventListeners<RetryEvent>,
    mut operation: F,
) -> Result<T, RetryExhaustedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HandlerError>>,
{
    let total_attempts = config.map(|c| c.total_attempts()).unwrap_or(1);
    let retry_interval = config.map(|c| c.retry_interval()).unwrap_or_default();

    let mut last_error: Option<HandlerError> = None;
    for attempt in 1..=total_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    listeners.emit(&RetryEvent::Success {
                        chain_name: chain_name.to_string(),
                        timestamp: Instant::now(),
                        destination_id: destination_id.to_string(),
                        attempts: attempt,
                    });
                }
                return Ok(value);
            }
            Err(err) => {
                let is_last_attempt = attempt == total_attempts;
                if !is_last_attempt {
                    listeners.emit(&RetryEvent::Attempt {
                        chain_name: chain_name.to_string(),
                        timestamp: Instant::now(),
                        destination_id: destination_id.to_string(),
                        attempt,
                    });
                    #[cfg(feature = "tracing")]
                    tracing::debug!(chain = chain_name, destination = destination_id, attempt, error = %err, "destination call failed, retrying");
                    tokio::time::sleep(retry_interval).await;
                }
                last_error = Some(err);
            }
        }
    }

    let cause = last_error.expect("loop always runs at least once");
    #[cfg(feature = "metrics")]
    metrics::counter!(
        "handler_chain_retry_exhausted_total",
        "chain" => chain_name.to_string(),
        "destination" => destination_id.to_string()
    )
    .increment(1);
    listeners.emit(&RetryEvent::Exhausted {
        chain_name: chain_name.to_string(),
        timestamp: Instant::now(),
        destination_id: destination_id.to_string(),
        attempts: total_attempts,
    });
    Err(RetryExhaustedError::new(cause))
}

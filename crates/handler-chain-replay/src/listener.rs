//! Background task that polls a store and re-drives failed messages.

use crate::config::ReplayListenerConfiguration;
use crate::error::ReplayError;
use handler_chain_core::{Message, Replayer};
use handler_chain_store::{DurableStore, Envelope};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Polls a replay store at a fixed interval, replays each envelope through
/// the bound [`Replayer`], retries up to `max_retries` times with
/// `retry_interval` between attempts, and dead-letters exhausted messages.
///
/// Grounded on the same `start`/`stop`/`Drop`-aborts-task lifecycle as the
/// teacher's health-check wrapper: a `JoinHandle` held directly, spawned on
/// `start`, aborted on `stop` or `Drop`.
pub struct ReplayListener<S: DurableStore + 'static> {
    replayer: Arc<dyn Replayer>,
    config: Arc<ReplayListenerConfiguration<S>>,
    task: Option<JoinHandle<()>>,
}

impl<S: DurableStore + 'static> ReplayListener<S> {
    pub fn new(replayer: Arc<dyn Replayer>, config: ReplayListenerConfiguration<S>) -> Self {
        Self {
            replayer,
            config: Arc::new(config),
            task: None,
        }
    }

    /// Spawns the background poll loop. Returns [`ReplayError::AlreadyRunning`]
    /// if already started.
    pub fn start(&mut self) -> Result<(), ReplayError> {
        if self.task.is_some() {
            return Err(ReplayError::AlreadyRunning);
        }
        let replayer = Arc::clone(&self.replayer);
        let config = Arc::clone(&self.config);
        self.task = Some(tokio::spawn(poll_loop(replayer, config)));
        Ok(())
    }

    /// Aborts the background poll loop, if running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<S: DurableStore + 'static> Drop for ReplayListener<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_loop<S: DurableStore + 'static>(
    replayer: Arc<dyn Replayer>,
    config: Arc<ReplayListenerConfiguration<S>>,
) {
    let mut interval = tokio::time::interval(config.polling_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let store = config.poll_store();
        let envelope = match store.retrieve().await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => continue,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(chain = %replayer.name(), error = %err, "replay store poll failed");
                let _ = err;
                continue;
            }
        };

        process_envelope(envelope, &replayer, &config, store).await;
    }
}

/// Single-flight handling of one polled envelope: replay, retry on failure
/// up to `total_attempts`, then dead-letter and acknowledge the source.
async fn process_envelope<S: DurableStore + 'static>(
    envelope: Envelope,
    replayer: &Arc<dyn Replayer>,
    config: &ReplayListenerConfiguration<S>,
    source_store: &Arc<S>,
) {
    let mut message: Message = envelope.payload.clone();
    let mut attempt = 1u32;

    loop {
        match replayer.replay(message.clone()).await {
            Ok(_success) => {
                let _ = source_store.acknowledge(&envelope.id, true).await;
                return;
            }
            Err(failure) => {
                message = failure.message;
                if attempt >= config.total_attempts() {
                    dead_letter(envelope, message, config, source_store).await;
                    return;
                }
                attempt += 1;
                tokio::time::sleep(config.retry_interval()).await;
            }
        }
    }
}

async fn dead_letter<S: DurableStore + 'static>(
    envelope: Envelope,
    message: Message,
    config: &ReplayListenerConfiguration<S>,
    source_store: &Arc<S>,
) {
    match config.dead_letter_store.store(message).await {
        Ok(()) => {
            #[cfg(feature = "metrics")]
            metrics::counter!("handler_chain_dead_lettered_total").increment(1);
            let _ = source_store.acknowledge(&envelope.id, true).await;
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::error!(envelope = %envelope.id, error = %err, "dead-letter write failed, refusing to acknowledge");
            #[cfg(feature = "metrics")]
            metrics::counter!("handler_chain_dead_letter_write_failures_total").increment(1);
            let _ = err;
            let _ = source_store.acknowledge(&envelope.id, false).await;
        }
    }
}

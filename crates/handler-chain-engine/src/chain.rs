//! `HandlerChain`: orchestrates the processor and destination stages,
//! writes failures to the failure store, and owns a replay listener.

use crate::destination::Destination;
use crate::destination_stage;
use crate::error::ConfigurationError;
use crate::events::ExecutionEvent;
use crate::processor::Processor;
use crate::processor_stage::{self, ProcessorStageOutcome};
use futures::future::BoxFuture;
use handler_chain_core::{
    ChainEventListener, EventListeners, ExecutionError, ExecutionResult, ExecutionSuccess, Message,
    MessageContext, Replayer, Value,
};
use handler_chain_replay::{ReplayListener, ReplayListenerConfiguration};
use handler_chain_retry::RetryEvent;
use handler_chain_store::DurableStore;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A named, immutable pipeline of processors and destinations plus a
/// failure store. Construct with [`HandlerChain::builder`].
pub struct HandlerChain<S: DurableStore + 'static> {
    name: String,
    processors: Vec<Processor>,
    destinations: Vec<Destination>,
    failure_store: Arc<S>,
    retry_listeners: EventListeners<RetryEvent>,
    execution_listeners: EventListeners<ExecutionEvent>,
    replay_listener: Mutex<Option<ReplayListener<S>>>,
}

impl<S: DurableStore + 'static> HandlerChain<S> {
    pub fn builder() -> HandlerChainBuilder<S> {
        HandlerChainBuilder::new()
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_failure_store(&self) -> &Arc<S> {
        &self.failure_store
    }

    /// Builds a fresh context, runs the processor then destination stage,
    /// and persists a snapshot to the failure store on any failure.
    pub async fn execute(&self, content: Value) -> ExecutionResult {
        let id = Uuid::new_v4().to_string();
        let context = MessageContext::new(Message::new(id, self.name.clone(), content));
        let snapshot = context.clone();
        self.run_pipeline(context, snapshot, true).await
    }

    /// Re-drives a persisted `Message` through the same pipeline, honoring
    /// its skip list, without writing to the failure store on error — the
    /// caller (the replay listener) owns that decision.
    pub async fn replay(&self, message: Message) -> ExecutionResult {
        let mut message = message;
        message.clean_for_replay();
        let context = MessageContext::new(message);
        let snapshot = context.clone();
        self.run_pipeline(context, snapshot, false).await
    }

    async fn run_pipeline(
        &self,
        context: MessageContext,
        mut snapshot: MessageContext,
        write_on_failure: bool,
    ) -> ExecutionResult {
        let stage_outcome = match processor_stage::run(context, &self.processors).await {
            Ok(outcome) => outcome,
            Err(err) => {
                snapshot.set_error(err.to_string(), err.underlying.detail.clone());
                self.execution_listeners.emit(&ExecutionEvent::ProcessorFailed {
                    chain_name: self.name.clone(),
                    timestamp: std::time::Instant::now(),
                    processor_id: err.processor_id.clone(),
                });
                let record = snapshot.to_record();
                if write_on_failure {
                    self.write_failure(record.clone()).await;
                }
                return Err(ExecutionError {
                    message: record,
                    error: err.to_string(),
                });
            }
        };

        let live_context = match stage_outcome {
            ProcessorStageOutcome::Drop(ctx) => {
                self.execution_listeners.emit(&ExecutionEvent::FilteredOut {
                    chain_name: self.name.clone(),
                    timestamp: std::time::Instant::now(),
                    processor_id: String::new(),
                });
                return Ok(ExecutionSuccess {
                    message: ctx.to_record(),
                    destination_results: Default::default(),
                });
            }
            ProcessorStageOutcome::Continue(ctx) => ctx,
        };

        let outcome = destination_stage::run(
            &live_context,
            &self.destinations,
            &self.name,
            &self.retry_listeners,
        )
        .await;

        self.execution_listeners.emit(&ExecutionEvent::DestinationsCompleted {
            chain_name: self.name.clone(),
            timestamp: std::time::Instant::now(),
            succeeded: outcome.successes.len(),
            failed: outcome.failures.len(),
        });
        #[cfg(feature = "metrics")]
        record_destination_outcome_metric(&self.name, outcome.successes.len(), outcome.failures.len());

        for destination_id in outcome.successes.keys() {
            snapshot.mark_destination_skipped(destination_id);
        }

        if outcome.failures.is_empty() {
            return Ok(ExecutionSuccess {
                message: snapshot.to_record(),
                destination_results: outcome.successes,
            });
        }

        let failure_report = destination_stage::report_failure(&outcome.failures);
        {
            let record = snapshot.message_mut();
            record.destination_results = outcome.successes;
            record.destination_errors = outcome.failures;
            record.error_msg = Some(failure_report.to_string());
            if let crate::error::DestinationError::Single { underlying, .. } = &failure_report {
                record.error_details = underlying.detail.clone();
            }
        }

        let record = snapshot.to_record();
        if write_on_failure {
            self.write_failure(record.clone()).await;
        }
        Err(ExecutionError {
            message: record,
            error: failure_report.to_string(),
        })
    }

    async fn write_failure(&self, message: Message) {
        if let Err(err) = self.failure_store.store(message).await {
            self.execution_listeners.emit(&ExecutionEvent::FailureStoreWriteFailed {
                chain_name: self.name.clone(),
                timestamp: std::time::Instant::now(),
                detail: err.to_string(),
            });
            #[cfg(feature = "tracing")]
            tracing::warn!(chain = %self.name, error = %err, "failed to persist failure-store snapshot");
        }
    }

    /// Starts a replay listener bound to this chain's lifetime and stores it
    /// for later `stop`/`Drop`. Only called once, from `HandlerChainBuilder::build`.
    fn start_replay_listener(
        self: &Arc<Self>,
        config: ReplayListenerConfiguration<S>,
    ) -> Result<(), ConfigurationError> {
        let replayer: Arc<dyn Replayer> = Arc::clone(self) as Arc<dyn Replayer>;
        let mut listener = ReplayListener::new(replayer, config);
        listener
            .start()
            .map_err(|e| ConfigurationError::ListenerStartFailed(e.to_string()))?;
        *self.replay_listener.lock().unwrap() = Some(listener);
        Ok(())
    }
}

#[cfg(feature = "metrics")]
fn record_destination_outcome_metric(chain_name: &str, succeeded: usize, failed: usize) {
    let chain_label = chain_name.to_string();
    metrics::counter!("handler_chain_destination_successes_total", "chain" => chain_label.clone())
        .increment(succeeded as u64);
    metrics::counter!("handler_chain_destination_failures_total", "chain" => chain_label)
        .increment(failed as u64);
}

impl<S: DurableStore + 'static> Replayer for HandlerChain<S> {
    fn replay(&self, message: Message) -> BoxFuture<'_, ExecutionResult> {
        Box::pin(self.replay(message))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for [`HandlerChain`]. Fails with [`ConfigurationError`] if either
/// the processor or destination list is empty, or the name is empty.
pub struct HandlerChainBuilder<S: DurableStore + 'static> {
    name: Option<String>,
    processors: Vec<Processor>,
    destinations: Vec<Destination>,
    failure_store: Option<Arc<S>>,
    replay_config: Option<ReplayListenerConfiguration<S>>,
    execution_listeners: EventListeners<ExecutionEvent>,
    retry_listeners: EventListeners<RetryEvent>,
}

impl<S: DurableStore + 'static> HandlerChainBuilder<S> {
    fn new() -> Self {
        Self {
            name: None,
            processors: Vec::new(),
            destinations: Vec::new(),
            failure_store: None,
            replay_config: None,
            execution_listeners: EventListeners::new(),
            retry_listeners: EventListeners::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn processors(mut self, processors: Vec<Processor>) -> Self {
        self.processors = processors;
        self
    }

    pub fn destinations(mut self, destinations: Vec<Destination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn failure_store(mut self, failure_store: Arc<S>) -> Self {
        self.failure_store = Some(failure_store);
        self
    }

    pub fn replay_config(mut self, replay_config: ReplayListenerConfiguration<S>) -> Self {
        self.replay_config = Some(replay_config);
        self
    }

    /// Registers a listener for execution-level events (processor failures,
    /// filtered-out messages, destination completion, failure-store write
    /// failures). Multiple listeners may be registered; all run on every event.
    pub fn on_execution_event<L>(mut self, listener: L) -> Self
    where
        L: ChainEventListener<ExecutionEvent> + 'static,
    {
        self.execution_listeners.add(listener);
        self
    }

    /// Registers a listener for per-destination retry events (attempt,
    /// success after retry, exhaustion).
    pub fn on_retry_event<L>(mut self, listener: L) -> Self
    where
        L: ChainEventListener<RetryEvent> + 'static,
    {
        self.retry_listeners.add(listener);
        self
    }

    pub fn build(self) -> Result<Arc<HandlerChain<S>>, ConfigurationError> {
        let name = self.name.unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if self.processors.is_empty() {
            return Err(ConfigurationError::EmptyProcessors);
        }
        if self.destinations.is_empty() {
            return Err(ConfigurationError::EmptyDestinations);
        }
        let failure_store = self.failure_store.ok_or(ConfigurationError::MissingFailureStore)?;

        let chain = Arc::new(HandlerChain {
            name,
            processors: self.processors,
            destinations: self.destinations,
            failure_store,
            retry_listeners: self.retry_listeners,
            execution_listeners: self.execution_listeners,
            replay_listener: Mutex::new(None),
        });

        if let Some(replay_config) = self.replay_config {
            chain.start_replay_listener(replay_config)?;
        }

        Ok(chain)
    }
}

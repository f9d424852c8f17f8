//! A handler chain execution engine and replay coordinator for message
//! processing pipelines.
//!
//! `handler-chain` assembles a pipeline ("handler chain") out of ordered,
//! idempotent processors — filters, transformers, and generic side-effecting
//! steps — followed by a parallel fan-out to one or more destinations, each
//! with its own retry policy. Any destination failure persists the message
//! to a durable failure store; a background replay listener re-drives
//! persisted messages, skipping destinations that already succeeded, and
//! dead-letters messages that exhaust their retry budget.
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! handler-chain = "0.1"
//! ```
//!
//! # Pipeline Stages
//!
//! - **[Processor stage]** — runs [`Processor`]s in declaration order: a
//!   `Filter` can drop the message, a `Transformer` replaces its content, a
//!   `Generic` step runs for side effects only. The first error aborts the
//!   whole traversal.
//! - **[Destination stage]** — runs every destination not already recorded
//!   as succeeded, concurrently, each against its own deep-cloned context.
//!   Destinations may carry a [`RetryConfig`] for bounded retry with a fixed
//!   interval.
//! - **[Failure persistence]** — any destination failure writes a snapshot
//!   of the message (with the destinations that *did* succeed recorded in
//!   its skip list) to a [`DurableStore`].
//! - **[Replay]** — a [`ReplayListener`] polls a store at a fixed interval,
//!   calls [`HandlerChain::replay`] on each envelope, retries failures with
//!   a fixed interval, and writes exhausted messages to a dead-letter store.
//!
//! [Processor stage]: handler_chain_engine::Processor
//! [Destination stage]: handler_chain_engine::Destination
//! [Failure persistence]: DurableStore
//! [Replay]: ReplayListener
//!
//! # Example
//!
//! ```rust,no_run
//! use handler_chain::{Destination, HandlerChain, InMemoryStore, Processor};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let chain = HandlerChain::builder()
//!     .name("orders")
//!     .processors(vec![Processor::filter("validate", Arc::new(|ctx| {
//!         Box::pin(async move {
//!             let is_valid = ctx.get_content().get("sku").is_some();
//!             Ok((ctx, is_valid))
//!         })
//!     }))])
//!     .destinations(vec![Destination::new("warehouse", Arc::new(|ctx| {
//!         Box::pin(async move { Ok(ctx.get_content()) })
//!     }))])
//!     .failure_store(Arc::new(InMemoryStore::new()))
//!     .build()?;
//!
//! let result = chain.execute(serde_json::json!({"sku": "abc-123"})).await;
//! # let _ = result;
//! # Ok(())
//! # }
//! ```
//!
//! ### Trade-offs
//!
//! - **At-least-once, not exactly-once**: handlers must be idempotent; the
//!   engine only offers effectual-skip of already-succeeded destinations.
//! - **Restart-from-zero replay**: processor-stage progress is never
//!   persisted — every replay re-runs every processor.
//! - **Single store type per chain**: a `HandlerChain<S>` and its
//!   `ReplayListener<S>` share one concrete `DurableStore` implementation,
//!   since native `async fn` trait methods aren't `dyn`-compatible.

pub use handler_chain_core::{
    describe_panic, from_value, to_value, BoxedEventListener, ChainEvent, ChainEventListener,
    ConversionError, ErrorInfo, EventListeners, ExecutionError, ExecutionResult, ExecutionSuccess,
    FnListener, HandlerError, Message, MessageContext, MessageMetadata, Replayer, Value,
};
pub use handler_chain_engine::{
    ConfigurationError, Destination, DestinationError, ExecutionEvent, HandlerChain,
    HandlerChainBuilder, Processor, ProcessorError,
};
pub use handler_chain_replay::{
    ReplayError, ReplayListener, ReplayListenerConfiguration, ReplayListenerConfigurationBuilder,
};
pub use handler_chain_retry::{RetryConfig, RetryConfigBuilder, RetryEvent, RetryExhaustedError};
pub use handler_chain_store::{DurableStore, Envelope, InMemoryStore, StoreError};

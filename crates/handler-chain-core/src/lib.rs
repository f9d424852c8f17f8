//! Core data model, event system and error taxonomy shared by every
//! handler-chain crate.
//!
//! - [`message`] / [`context`] — the `Message` record and the mutable
//!   `MessageContext` wrapper that pipelines operate on.
//! - [`value`] — the dynamic content/property representation and its
//!   conversion errors.
//! - [`error`] — the error a processor or destination callable returns.
//! - [`outcome`] — `ExecutionSuccess` / `ExecutionError`.
//! - [`replayer`] — the `Replayer` trait a replay listener drives, breaking
//!   the dependency cycle between the engine and replay crates.
//! - [`events`] — observability events and panic-isolated listener dispatch.

pub mod context;
pub mod error;
pub mod events;
pub mod message;
pub mod outcome;
pub mod replayer;
pub mod value;

pub use context::MessageContext;
pub use error::{describe_panic, HandlerError};
pub use events::{BoxedEventListener, ChainEvent, ChainEventListener, EventListeners, FnListener};
pub use message::{ErrorInfo, Message, MessageMetadata};
pub use outcome::{ExecutionError, ExecutionResult, ExecutionSuccess};
pub use replayer::Replayer;
pub use value::{from_value, to_value, ConversionError, Value};

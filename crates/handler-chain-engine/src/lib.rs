//! The handler chain orchestrator.
//!
//! [`HandlerChain`] runs a named, ordered list of [`Processor`]s over a
//! message, then fans the surviving message out to every [`Destination`]
//! not already marked as skipped. Any destination failure persists the
//! message to a failure store; construct the chain with a
//! [`handler_chain_replay::ReplayListenerConfiguration`] to also run a
//! background listener that re-drives persisted failures.

mod chain;
mod destination;
mod destination_stage;
mod error;
mod events;
mod processor;
mod processor_stage;

pub use chain::{HandlerChain, HandlerChainBuilder};
pub use destination::{Destination, DestinationFn};
pub use error::{ConfigurationError, DestinationError, ProcessorError};
pub use events::ExecutionEvent;
pub use processor::{FilterFn, GenericFn, Processor, TransformerFn};

//! Polls a failure store and re-drives persisted messages through a
//! handler chain, retrying with a fixed interval and dead-lettering
//! messages that exhaust their retry budget.
//!
//! This crate depends only on `handler-chain-core`'s [`Replayer`] trait and
//! `handler-chain-store`'s [`DurableStore`] trait, never on the engine
//! crate directly — the engine depends on this crate, not the reverse.
//!
//! [`Replayer`]: handler_chain_core::Replayer
//! [`DurableStore`]: handler_chain_store::DurableStore

mod config;
mod error;
mod listener;

pub use config::{ReplayListenerConfiguration, ReplayListenerConfigurationBuilder};
pub use error::ReplayError;
pub use listener::ReplayListener;

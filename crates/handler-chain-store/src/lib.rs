//! The durable store capability handler-chain depends on for failure,
//! replay, and dead-letter persistence.
//!
//! This crate defines the [`DurableStore`] trait — `store` / `retrieve` /
//! `acknowledge` — and ships one concrete [`InMemoryStore`] used across the
//! workspace's own tests and examples. A production deployment adapts a
//! real queue (SQS, Kafka, a Postgres-backed table) to this trait.

pub mod envelope;
pub mod error;
pub mod in_memory;
pub mod store;

pub use envelope::Envelope;
pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use store::DurableStore;

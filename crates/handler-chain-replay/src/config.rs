//! Configuration for a [`crate::ReplayListener`].

use handler_chain_store::DurableStore;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a replay listener bound to one chain.
///
/// When `replay_store` is absent the listener polls the same store passed
/// as `dead_letter_store`'s sibling — the chain's own failure store.
pub struct ReplayListenerConfiguration<S: DurableStore> {
    pub(crate) polling_interval: Duration,
    pub(crate) max_retries: u32,
    pub(crate) retry_interval: Duration,
    pub(crate) dead_letter_store: Arc<S>,
    pub(crate) replay_store: Option<Arc<S>>,
}

impl<S: DurableStore> ReplayListenerConfiguration<S> {
    pub fn builder() -> ReplayListenerConfigurationBuilder<S> {
        ReplayListenerConfigurationBuilder::new()
    }

    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    pub fn total_attempts(&self) -> u32 {
        1 + self.max_retries
    }
}

/// Builder for [`ReplayListenerConfiguration`]. Requires a `dead_letter_store`
/// and, unless `replay_store` is set, the failure store passed to
/// [`ReplayListenerConfiguration::builder`]'s caller is used for both roles.
pub struct ReplayListenerConfigurationBuilder<S: DurableStore> {
    polling_interval: Duration,
    max_retries: u32,
    retry_interval: Duration,
    dead_letter_store: Option<Arc<S>>,
    replay_store: Option<Arc<S>>,
}

impl<S: DurableStore> ReplayListenerConfigurationBuilder<S> {
    fn new() -> Self {
        Self {
            polling_interval: Duration::from_secs(5),
            max_retries: 0,
            retry_interval: Duration::ZERO,
            dead_letter_store: None,
            replay_store: None,
        }
    }

    pub fn polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn dead_letter_store(mut self, store: Arc<S>) -> Self {
        self.dead_letter_store = Some(store);
        self
    }

    pub fn replay_store(mut self, store: Arc<S>) -> Self {
        self.replay_store = Some(store);
        self
    }

    /// Builds the configuration, defaulting `replay_store` to `source_store`
    /// (normally the chain's own failure store) when none was set.
    pub fn build(self, source_store: Arc<S>) -> ReplayListenerConfiguration<S> {
        ReplayListenerConfiguration {
            polling_interval: self.polling_interval,
            max_retries: self.max_retries,
            retry_interval: self.retry_interval,
            dead_letter_store: self.dead_letter_store.unwrap_or_else(|| Arc::clone(&source_store)),
            replay_store: Some(self.replay_store.unwrap_or(source_store)),
        }
    }
}

impl<S: DurableStore> ReplayListenerConfiguration<S> {
    /// The store to poll. Always set: the builder defaults it to the source
    /// store passed to `build` when no explicit `replay_store` was given.
    pub(crate) fn poll_store(&self) -> &Arc<S> {
        self.replay_store
            .as_ref()
            .expect("builder always sets replay_store")
    }
}

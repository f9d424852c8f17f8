//! Destination descriptors: a callable plus an optional retry policy.

use futures::future::BoxFuture;
use handler_chain_core::{HandlerError, MessageContext, Value};
use handler_chain_retry::RetryConfig;
use std::sync::Arc;

pub type DestinationFn =
    Arc<dyn Fn(MessageContext) -> BoxFuture<'static, Result<Value, HandlerError>> + Send + Sync>;

/// `{ id, callable, retryConfig? }`. Retry wrapping happens at registration
/// time conceptually; in practice the destination stage applies
/// `handler_chain_retry::with_retry` using this descriptor's config on every
/// invocation, which is equivalent and avoids storing a second boxed
/// closure.
#[derive(Clone)]
pub struct Destination {
    pub id: String,
    pub callable: DestinationFn,
    pub retry_config: Option<RetryConfig>,
}

impl Destination {
    pub fn new(id: impl Into<String>, callable: DestinationFn) -> Self {
        Self {
            id: id.into(),
            callable,
            retry_config: None,
        }
    }

    pub fn with_retry(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = Some(retry_config);
        self
    }
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Destination")
            .field("id", &self.id)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

//! Processor descriptors: value types pairing a stable id with a callable.

use futures::future::BoxFuture;
use handler_chain_core::{HandlerError, MessageContext, Value};
use std::sync::Arc;

/// A filter, transformer, or generic processor callable. Callables take
/// ownership of the context and hand it back alongside their result — this
/// keeps the callable `'static` and lets the stage thread the context
/// through each processor in turn without borrowing across an await point.
pub type FilterFn =
    Arc<dyn Fn(MessageContext) -> BoxFuture<'static, Result<(MessageContext, bool), HandlerError>> + Send + Sync>;
pub type TransformerFn = Arc<
    dyn Fn(MessageContext) -> BoxFuture<'static, Result<(MessageContext, Value), HandlerError>>
        + Send
        + Sync,
>;
pub type GenericFn =
    Arc<dyn Fn(MessageContext) -> BoxFuture<'static, Result<MessageContext, HandlerError>> + Send + Sync>;

/// One stage of the processor chain: a filter (boolean gate), a transformer
/// (content replacement), or a generic side-effecting unit.
#[derive(Clone)]
pub enum Processor {
    Filter { id: String, callable: FilterFn },
    Transformer { id: String, callable: TransformerFn },
    Generic { id: String, callable: GenericFn },
}

impl Processor {
    pub fn filter(id: impl Into<String>, callable: FilterFn) -> Self {
        Self::Filter {
            id: id.into(),
            callable,
        }
    }

    pub fn transformer(id: impl Into<String>, callable: TransformerFn) -> Self {
        Self::Transformer {
            id: id.into(),
            callable,
        }
    }

    pub fn generic(id: impl Into<String>, callable: GenericFn) -> Self {
        Self::Generic {
            id: id.into(),
            callable,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Processor::Filter { id, .. } => id,
            Processor::Transformer { id, .. } => id,
            Processor::Generic { id, .. } => id,
        }
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Processor::Filter { .. } => "Filter",
            Processor::Transformer { .. } => "Transformer",
            Processor::Generic { .. } => "Generic",
        };
        f.debug_struct("Processor")
            .field("kind", &kind)
            .field("id", &self.id())
            .finish()
    }
}

//! The dynamic value carried as message content and property values.
//!
//! The engine moves arbitrary application payloads through a pipeline without
//! knowing their shape ahead of time. [`serde_json::Value`] already is a
//! tagged dynamic value — a sum of primitives, sequences, and string-keyed
//! maps — and its wire form is exactly the JSON-equivalent structured data
//! the store capability persists, so we reuse it rather than invent a
//! parallel enum.

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use serde_json::Value;

/// Raised when a handler asks for a value as a type the value cannot be
/// adapted to.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to convert value to the specified type")]
pub struct ConversionError;

/// Decodes a [`Value`] into a concrete type, surfacing [`ConversionError`] on
/// mismatch rather than serde's own (much noisier) error type.
pub fn from_value<T>(value: &Value) -> Result<T, ConversionError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value.clone()).map_err(|_| ConversionError)
}

/// Encodes a concrete type into a [`Value`].
///
/// # Panics
///
/// Panics if `T`'s `Serialize` implementation fails, which only happens for
/// types that are not representable as JSON (e.g. maps with non-string
/// keys). Handler authors are expected to use JSON-safe types.
pub fn to_value<T>(value: &T) -> Value
where
    T: Serialize,
{
    serde_json::to_value(value).expect("value must be representable as JSON")
}

//! Tolerant field deserializers shared by the models and legacy payloads.
//!
//! Stored and imported payloads may carry `null` collections, numbers where
//! text is expected or malformed entries. These helpers turn such values into
//! defaults instead of failing the whole document.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use super::ItemId;

/// Text field; anything but a string becomes empty.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

/// Flag field; only a literal `true` is true.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// List of texts; non-string entries are kept as empty strings so positions
/// referenced by step links stay stable.
pub(crate) fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                _ => String::new(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// List of records; entries that do not decode are dropped.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Set of positions; entries that are not non-negative integers are dropped.
pub(crate) fn positions<'de, D>(deserializer: D) -> Result<BTreeSet<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_u64)
            .filter_map(|position| usize::try_from(position).ok())
            .collect(),
        _ => BTreeSet::new(),
    })
}

/// Any value that fails to decode falls back to its default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Identifier; numbers are kept as text, blanks get a fresh id.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) if !text.is_empty() => ItemId::from(text),
        Value::Number(number) => ItemId::from(number.to_string()),
        _ => ItemId::generate(),
    })
}

//! The storable output tree.
//!
//! A [`StorableValue`] is what the sanitizer hands to the document store. The
//! type itself can still represent a sequence inside a sequence; the
//! sanitizer is what guarantees such nesting never reaches the store, and
//! [`StorableValue::contains_nested_sequence`] lets callers check it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A value the document store accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StorableValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Ordered elements. Order is z-order or point-path order and must survive.
    Sequence(Vec<StorableValue>),
    /// Unordered fields. Never holds an absent binding.
    Mapping(BTreeMap<String, StorableValue>),
}

impl StorableValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[StorableValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, StorableValue>> {
        match self {
            Self::Mapping(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StorableValue> {
        self.as_mapping().and_then(|fields| fields.get(key))
    }

    /// True when any sequence in the tree directly contains another sequence.
    ///
    /// Always false for sanitizer output.
    #[must_use]
    pub fn contains_nested_sequence(&self) -> bool {
        match self {
            Self::Sequence(items) => items
                .iter()
                .any(|item| item.is_sequence() || item.contains_nested_sequence()),
            Self::Mapping(fields) => fields.values().any(Self::contains_nested_sequence),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => false,
        }
    }

    /// True when some mapping in the tree uses `item_N` positional keys.
    #[must_use]
    pub fn contains_item_encoding(&self) -> bool {
        match self {
            Self::Sequence(items) => items.iter().any(Self::contains_item_encoding),
            Self::Mapping(fields) => {
                fields.keys().any(|key| crate::parse_item_key(key).is_some())
                    || fields.values().any(Self::contains_item_encoding)
            }
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => false,
        }
    }

    /// Convert into a JSON value for the store client.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => Value::Number(n),
            Self::String(s) => Value::String(s),
            Self::Sequence(items) => Value::Array(items.into_iter().map(Self::into_json).collect()),
            Self::Mapping(fields) => {
                let map: Map<String, Value> = fields.into_iter().map(|(k, v)| (k, v.into_json())).collect();
                Value::Object(map)
            }
        }
    }
}

impl From<StorableValue> for Value {
    fn from(value: StorableValue) -> Self {
        value.into_json()
    }
}

/// Stored JSON read back from the store. JSON has no absent marker, so this
/// conversion is total; it does not re-check the nesting invariant.
impl From<Value> for StorableValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;

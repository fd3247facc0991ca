//! The classified input tree.
//!
//! The editor's scene export is loosely typed. Every value is classified once,
//! up front, into a [`SceneValue`]; the sanitizer then matches exhaustively on
//! the variant instead of probing shapes at runtime.

use std::collections::BTreeMap;

use serde_json::{Number, Value};

/// One node of an exported scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneValue {
    /// Conceptually unset. Distinct from [`SceneValue::Null`]; the store
    /// refuses it as a field value.
    Absent,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<SceneValue>),
    Mapping(BTreeMap<String, SceneValue>),
    /// A value the editor could not classify (a date, a callback, a blob).
    /// `kind` is a short label used in error messages.
    Unsupported { kind: String },
}

impl SceneValue {
    /// Build a mapping from `(key, value)` pairs.
    pub fn mapping<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<SceneValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Mapping(fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Build an unsupported marker.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Short name of the variant, for logs and error messages.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Unsupported { kind } => kind.as_str(),
        }
    }
}

impl From<Value> for SceneValue {
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

impl From<&Value> for SceneValue {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<bool> for SceneValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SceneValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for SceneValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for SceneValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// NaN and infinities have no JSON representation and are classified as
/// unsupported.
impl From<f64> for SceneValue {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => Self::Number(n),
            None => Self::unsupported("non-finite number"),
        }
    }
}

impl From<&str> for SceneValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for SceneValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<SceneValue>> From<Vec<T>> for SceneValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// `None` is the absent marker, so optional struct fields drop out of the
/// stored document instead of turning into `null`.
impl<T: Into<SceneValue>> From<Option<T>> for SceneValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;

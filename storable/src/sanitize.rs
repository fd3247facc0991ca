//! Forward transform: [`SceneValue`] to [`StorableValue`].
//!
//! DESIGN
//! ======
//! One recursive walk, producing a fresh tree. The input is borrowed and never
//! modified.
//!
//! - absent and null become null
//! - a mapping keeps every key whose value is not absent; absent-bound keys
//!   are omitted, not nulled
//! - a sequence with at least one *direct* sequence element becomes a mapping
//!   keyed `item_0`, `item_1`, ... (only direct children are inspected; deeper
//!   nesting is handled when the walk reaches it)
//! - any other sequence keeps its length and order
//! - scalars pass through
//!
//! ERROR HANDLING
//! ==============
//! Unsupported values fail fast instead of reaching the store. Owned trees
//! cannot be cyclic, so the remaining hazard is recursion depth, which is
//! capped by [`Sanitizer::max_depth`]. Errors carry the path to the offending
//! node; the path is only assembled when an error unwinds.

use std::collections::BTreeMap;

use crate::scene::SceneValue;
use crate::value::StorableValue;

/// Default cap on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Error returned by [`sanitize`] and [`Sanitizer::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    /// A value could not be classified as absent, null, scalar, sequence or mapping.
    #[error("unsupported value of kind '{kind}' at {path}")]
    Unsupported { path: String, kind: String },
    /// Containers are nested deeper than the configured limit.
    #[error("structure nested deeper than {max_depth} levels at {path}")]
    TooDeep { path: String, max_depth: usize },
}

impl SanitizeError {
    /// Path of the offending node, `/`-separated from the root.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Unsupported { path, .. } | Self::TooDeep { path, .. } => path,
        }
    }
}

/// Sanitizer with tunable limits. `Copy`, so callers can keep one in shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    /// Maximum number of nested containers on any root-to-leaf path.
    pub max_depth: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Sanitize with default limits.
///
/// # Errors
///
/// See [`Sanitizer::sanitize`].
pub fn sanitize(value: &SceneValue) -> Result<StorableValue, SanitizeError> {
    Sanitizer::default().sanitize(value)
}

enum FailureKind {
    Unsupported(String),
    TooDeep,
}

/// Error under construction. Segments are pushed leaf-first while unwinding.
struct Failure {
    kind: FailureKind,
    segments: Vec<String>,
}

impl Failure {
    fn new(kind: FailureKind) -> Self {
        Self { kind, segments: Vec::new() }
    }

    fn at(mut self, segment: String) -> Self {
        self.segments.push(segment);
        self
    }
}

impl Sanitizer {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Produce a storable copy of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizeError::Unsupported`] when the tree holds an
    /// [`SceneValue::Unsupported`] node that is not under an omitted key, and
    /// [`SanitizeError::TooDeep`] when containers nest past `max_depth`.
    pub fn sanitize(&self, value: &SceneValue) -> Result<StorableValue, SanitizeError> {
        self.walk(value, 0).map_err(|failure| self.finish(failure))
    }

    fn finish(&self, failure: Failure) -> SanitizeError {
        let path = if failure.segments.is_empty() {
            "/".to_owned()
        } else {
            failure.segments.iter().rev().fold(String::new(), |mut path, segment| {
                path.push('/');
                path.push_str(segment);
                path
            })
        };
        match failure.kind {
            FailureKind::Unsupported(kind) => SanitizeError::Unsupported { path, kind },
            FailureKind::TooDeep => SanitizeError::TooDeep { path, max_depth: self.max_depth },
        }
    }

    fn walk(&self, value: &SceneValue, depth: usize) -> Result<StorableValue, Failure> {
        match value {
            SceneValue::Absent | SceneValue::Null => Ok(StorableValue::Null),
            SceneValue::Bool(b) => Ok(StorableValue::Bool(*b)),
            SceneValue::Number(n) => Ok(StorableValue::Number(n.clone())),
            SceneValue::String(s) => Ok(StorableValue::String(s.clone())),
            SceneValue::Unsupported { kind } => Err(Failure::new(FailureKind::Unsupported(kind.clone()))),
            SceneValue::Sequence(items) => {
                self.check_depth(depth)?;
                if items.iter().any(SceneValue::is_sequence) {
                    let mut fields = BTreeMap::new();
                    for (index, item) in items.iter().enumerate() {
                        let key = crate::item_key(index);
                        let clean = self.walk(item, depth + 1).map_err(|f| f.at(key.clone()))?;
                        fields.insert(key, clean);
                    }
                    Ok(StorableValue::Mapping(fields))
                } else {
                    let mut clean = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        clean.push(self.walk(item, depth + 1).map_err(|f| f.at(index.to_string()))?);
                    }
                    Ok(StorableValue::Sequence(clean))
                }
            }
            SceneValue::Mapping(fields) => {
                self.check_depth(depth)?;
                let mut clean = BTreeMap::new();
                for (key, field) in fields {
                    if field.is_absent() {
                        continue;
                    }
                    let stored = self.walk(field, depth + 1).map_err(|f| f.at(key.clone()))?;
                    clean.insert(key.clone(), stored);
                }
                Ok(StorableValue::Mapping(clean))
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), Failure> {
        if depth >= self.max_depth {
            return Err(Failure::new(FailureKind::TooDeep));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;

//! Scene sanitization for the canvas document store.
//!
//! The drawing editor exports its scene graph as a loose tree of mappings,
//! sequences and scalars. The document store that persists canvases refuses
//! two shapes that ordinary JSON allows: fields bound to an absent value, and
//! sequences that directly contain sequences (freehand path point lists are
//! the usual culprit). This crate turns the former into the latter's safe
//! counterpart without losing any present information.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`scene`] | [`SceneValue`], the classified input tree (may hold absent markers) |
//! | [`value`] | [`StorableValue`], the output tree the store accepts |
//! | [`sanitize`] | The forward transform and its error type |
//! | [`restore`] | The opt-in inverse of the `item_N` re-encoding |

pub mod restore;
pub mod sanitize;
pub mod scene;
pub mod value;

pub use restore::{restore_json, restore_sequences};
pub use sanitize::{DEFAULT_MAX_DEPTH, SanitizeError, Sanitizer, sanitize};
pub use scene::SceneValue;
pub use value::StorableValue;

/// Key prefix used when a sequence of sequences is re-encoded as a mapping.
pub const ITEM_KEY_PREFIX: &str = "item_";

/// Build the positional key for element `index` of a re-encoded sequence.
#[must_use]
pub fn item_key(index: usize) -> String {
    format!("{ITEM_KEY_PREFIX}{index}")
}

/// Parse a positional key produced by [`item_key`].
///
/// Only canonical decimal indices are accepted: `item_01` and `item_` are not
/// positional keys.
#[must_use]
pub fn parse_item_key(key: &str) -> Option<usize> {
    let digits = key.strip_prefix(ITEM_KEY_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

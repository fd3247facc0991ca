//! Inverse of the `item_N` re-encoding.
//!
//! The store never sees a sequence of sequences, so a freehand path saved as
//! `[[0,0],[10,10]]` comes back as `{"item_0":[0,0],"item_1":[10,10]}`. Scene
//! importers that only understand the nested shape can run loaded data
//! through [`restore_json`] first.
//!
//! A mapping is turned back into a sequence when, after its children have
//! been restored, its keys are exactly `item_0..item_{n-1}` (n >= 1) and at
//! least one child is a sequence. The second condition is what the forward
//! transform always produces; it keeps ordinary mappings that happen to use
//! `item_` keys for scalars from being rewritten.

use serde_json::{Map, Value};

use crate::value::StorableValue;

/// Restore nested sequences in sanitizer output.
#[must_use]
pub fn restore_sequences(value: &StorableValue) -> Value {
    restore_json(&value.clone().into_json())
}

/// Restore nested sequences in stored JSON.
#[must_use]
pub fn restore_json(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(restore_json).collect()),
        Value::Object(fields) => {
            let restored: Map<String, Value> = fields.iter().map(|(k, v)| (k.clone(), restore_json(v))).collect();
            match positional_items(&restored) {
                Some(items) => Value::Array(items),
                None => Value::Object(restored),
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// Children in index order when `fields` is an item encoding.
fn positional_items(fields: &Map<String, Value>) -> Option<Vec<Value>> {
    if fields.is_empty() {
        return None;
    }
    let mut slots: Vec<Option<&Value>> = vec![None; fields.len()];
    for (key, value) in fields {
        let index = crate::parse_item_key(key)?;
        let slot = slots.get_mut(index)?;
        *slot = Some(value);
    }
    if !fields.values().any(Value::is_array) {
        return None;
    }
    slots.into_iter().map(|slot| slot.cloned()).collect()
}

#[cfg(test)]
#[path = "restore_test.rs"]
mod tests;

use serde_json::json;

use super::*;

#[test]
fn serializes_as_plain_json() {
    let value = StorableValue::from(json!({"a": [1, "x", null, true], "b": {"c": 2.5}}));
    let text = serde_json::to_string(&value).unwrap();
    assert_eq!(text, r#"{"a":[1,"x",null,true],"b":{"c":2.5}}"#);
}

#[test]
fn deserializes_from_plain_json() {
    let value: StorableValue = serde_json::from_str(r#"{"p":{"item_0":[0,0]},"n":null}"#).unwrap();
    assert!(value.get("n").is_some_and(StorableValue::is_null));
    let point = value.get("p").and_then(|p| p.get("item_0")).and_then(StorableValue::as_sequence);
    assert_eq!(point.map(<[StorableValue]>::len), Some(2));
}

#[test]
fn json_conversion_preserves_structure() {
    let json = json!({"objects": [{"left": 1, "tags": []}], "background": "#fff"});
    assert_eq!(StorableValue::from(json.clone()).into_json(), json);
}

#[test]
fn detects_nested_sequences_at_any_depth() {
    assert!(StorableValue::from(json!([[1]])).contains_nested_sequence());
    assert!(StorableValue::from(json!({"a": {"b": [1, [2]]}})).contains_nested_sequence());
    assert!(!StorableValue::from(json!({"a": [{"b": [1]}]})).contains_nested_sequence());
    assert!(!StorableValue::from(json!("[[1]]")).contains_nested_sequence());
}

#[test]
fn detects_item_encoding() {
    assert!(StorableValue::from(json!({"path": {"item_0": [1]}})).contains_item_encoding());
    assert!(!StorableValue::from(json!({"item": 1, "item_x": 2})).contains_item_encoding());
}

#[test]
fn accessors_reject_wrong_variant() {
    let value = StorableValue::String("s".to_owned());
    assert!(value.as_mapping().is_none());
    assert!(value.as_sequence().is_none());
    assert!(value.get("s").is_none());
    assert!(!value.is_sequence());
}

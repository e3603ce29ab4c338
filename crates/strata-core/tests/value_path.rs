use pretty_assertions::assert_eq;
use serde_json::json;
use strata_core::{record, Value};

fn item(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[test]
fn get_nested_field() {
    let item = item(json!({"author": {"address": {"city": "London"}}}));
    assert_eq!(item.get_path("author.address.city"), Some(&Value::from("London")));
    assert_eq!(item.get_path("author.address.zip"), None);
    assert!(item.contains_path("author.address"));
}

#[test]
fn get_list_element() {
    let item = item(json!({"tags": ["a", {"name": "b"}]}));
    assert_eq!(item.get_path("tags.1.name"), Some(&Value::from("b")));
    assert_eq!(item.get_path("tags.2"), None);
    assert_eq!(item.get_path("tags.x"), None);
}

#[test]
fn scalars_have_no_fields() {
    assert_eq!(Value::from(1).get_path("a"), None);
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

#[test]
fn set_creates_intermediate_records() {
    let mut item = record!();
    item.set_path("a.b.c", Value::from(1));
    assert_eq!(item, Value::from(json!({"a": {"b": {"c": 1}}})));
}

#[test]
fn set_replaces_scalar_parent() {
    let mut item = item(json!({"a": 1}));
    item.set_path("a.b", Value::from(2));
    assert_eq!(item, Value::from(json!({"a": {"b": 2}})));
}

#[test]
fn set_into_list_element() {
    let mut item = item(json!({"tags": [{"name": "a"}]}));
    item.set_path("tags.0.name", Value::from("b"));
    assert_eq!(item, Value::from(json!({"tags": [{"name": "b"}]})));
}

#[test]
fn remove_returns_value() {
    let mut item = item(json!({"a": {"b": 1, "c": 2}}));
    assert_eq!(item.remove_path("a.b"), Some(Value::from(1)));
    assert_eq!(item.remove_path("a.x"), None);
    assert_eq!(item, Value::from(json!({"a": {"c": 2}})));
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn writes_do_not_touch_clones() {
    let original = item(json!({"a": {"b": 1}}));
    let mut copy = original.clone();
    assert!(copy.is_same(&original));

    copy.set_path("a.b", Value::from(2));
    assert!(!copy.is_same(&original));
    assert_eq!(original.get_path("a.b"), Some(&Value::from(1)));
}

#[test]
fn equal_rebuilt_record_is_not_same() {
    let a = item(json!({"a": 1}));
    let b = item(json!({"a": 1}));
    assert_eq!(a, b);
    assert!(!a.is_same(&b));
    assert!(Value::from(1).is_same(&Value::from(1)));
}

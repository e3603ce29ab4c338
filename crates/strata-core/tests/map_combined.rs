use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use strata_core::{
    map::{CombinedMap, DeepMap, FieldMap, MapTarget, NoMap},
    Map, Mapped, Value,
};

fn item(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ---------------------------------------------------------------------------
// CombinedMap
// ---------------------------------------------------------------------------

fn chain() -> CombinedMap {
    CombinedMap::new(vec![
        Arc::new(FieldMap::new([("a", MapTarget::from("b")), ("x", MapTarget::Omit)])),
        Arc::new(FieldMap::new([("b", "c")])),
    ])
}

#[test]
fn field_goes_through_every_map() {
    assert_eq!(chain().apply_to_field("a"), Mapped::Field("c".into()));
    assert_eq!(chain().apply_to_field("b"), Mapped::Field("c".into()));
    assert_eq!(chain().apply_to_field("z"), Mapped::Unmapped);
}

#[test]
fn dropped_field_ends_chain() {
    assert_eq!(chain().apply_to_field("x"), Mapped::Omit);
}

#[test]
fn items_in_declared_order() {
    let stored = chain().apply(&item(json!({"a": 1, "x": 2})));
    assert_eq!(stored, item(json!({"c": 1})));
    assert_eq!(chain().apply_inverse(&item(json!({"c": 1}))), item(json!({"b": 1})));
}

#[test]
fn pair_is_split_then_renamed() {
    let map = CombinedMap::new(vec![
        Arc::new(DeepMap::new([("foo.type", "foos.type_id")])),
        Arc::new(FieldMap::new([("foos", "kinds")])),
    ]);

    assert_eq!(
        map.apply_to_pair("foo", &item(json!({"type": 1, "name": "x"}))),
        Some(vec![
            ("foo".to_string(), item(json!({"name": "x"}))),
            ("kinds.type_id".to_string(), Value::from(1)),
        ])
    );
    assert_eq!(
        map.apply(&item(json!({"foo": {"type": 1, "name": "x"}}))),
        item(json!({"foo": {"name": "x"}, "kinds": {"type_id": 1}}))
    );
}

#[test]
fn pair_of_dropped_field_is_removed() {
    assert_eq!(chain().apply_to_pair("x", &Value::from(1)), Some(vec![]));
    assert_eq!(
        chain().apply_to_pair("a", &Value::from(1)),
        Some(vec![("c".to_string(), Value::from(1))])
    );
    assert_eq!(chain().apply_to_pair("z", &Value::from(1)), None);
}

// ---------------------------------------------------------------------------
// NoMap
// ---------------------------------------------------------------------------

#[test]
fn no_map_changes_nothing() {
    let original = item(json!({"a": 1}));

    assert_eq!(NoMap.apply_to_field("a"), Mapped::Unmapped);
    assert!(NoMap.apply(&original).is_same(&original));
    assert!(NoMap.apply_inverse(&original).is_same(&original));
    assert!(NoMap.is_identity());
    assert!(CombinedMap::new(vec![Arc::new(NoMap)]).is_identity());
    assert!(!chain().is_identity());
}

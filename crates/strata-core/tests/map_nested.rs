use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use strata_core::{
    map::{DeepMap, FieldMap, NestedMap},
    Map, Mapped, Value,
};

fn item(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn nested() -> NestedMap {
    NestedMap::new(Arc::new(FieldMap::new([("one", "uno")])))
        .with_mapped_field("one", Arc::new(FieldMap::new([("color", "colour")])))
        .with_mapped_field("one.color", Arc::new(FieldMap::new([("red", "rood")])))
}

#[test]
fn field_goes_through_every_enclosing_map() {
    let map = nested();

    assert_eq!(
        map.apply_to_field("one.color.red"),
        Mapped::Field("uno.colour.rood".into())
    );
    assert_eq!(map.apply_to_field("one.size"), Mapped::Field("uno.size".into()));
    assert_eq!(map.apply_to_field("one"), Mapped::Field("uno".into()));
    assert_eq!(map.apply_to_field("two"), Mapped::Unmapped);
}

#[test]
fn mapped_field_points_into_mapped_item() {
    let map = NestedMap::new(Arc::new(FieldMap::new([("one", "uno")])))
        .with_mapped_field("one", Arc::new(FieldMap::new([("color", "colour")])));

    let stored = map.apply(&item(json!({"one": {"color": "red"}})));
    assert_eq!(stored, item(json!({"uno": {"colour": "red"}})));

    let Mapped::Field(path) = map.apply_to_field("one.color") else {
        panic!("field is mapped");
    };
    assert_eq!(path, "uno.colour");
    assert_eq!(stored.get_path(&path), Some(&Value::from("red")));
}

#[test]
fn pair_value_is_split_by_child_then_renamed() {
    let map = NestedMap::new(Arc::new(FieldMap::new([("one", "uno")])))
        .with_mapped_field("one", Arc::new(DeepMap::new([("shade.type", "kind")])));

    assert_eq!(
        map.apply_to_pair("one.shade", &item(json!({"type": 1, "name": "x"}))),
        Some(vec![
            ("uno.shade".to_string(), item(json!({"name": "x"}))),
            ("uno.kind".to_string(), Value::from(1)),
        ])
    );
    assert_eq!(
        map.apply_to_pair("one.size", &Value::from(3)),
        Some(vec![("uno.size".to_string(), Value::from(3))])
    );
    assert_eq!(map.apply_to_pair("two", &Value::from(3)), None);
}

#[test]
fn pair_on_child_field_maps_whole_value() {
    let map = NestedMap::default()
        .with_mapped_field("tags[]", Arc::new(FieldMap::new([("label", "name")])));

    assert_eq!(
        map.apply_to_pair("tags", &item(json!([{"label": "a"}, {"label": "b"}]))),
        Some(vec![("tags".to_string(), item(json!([{"name": "a"}, {"name": "b"}])))])
    );
    assert_eq!(map.apply_to_pair("tags", &Value::from("a")), None);
}

#[test]
fn children_are_applied_before_parents() {
    let map = nested();
    let original = item(json!({"one": {"color": {"red": 1}}}));

    let stored = map.apply(&original);
    assert_eq!(stored, item(json!({"uno": {"colour": {"rood": 1}}})));
    assert_eq!(map.apply_inverse(&stored), original);
}

#[test]
fn with_mapped_field_replaces_child() {
    let map = nested();
    let replaced = map.with_mapped_field("one", Arc::new(FieldMap::new([("color", "kleur")])));

    assert_eq!(
        replaced.apply(&item(json!({"one": {"color": "x"}}))),
        item(json!({"uno": {"kleur": "x"}}))
    );
    assert_eq!(
        map.apply(&item(json!({"one": {"color": "x"}}))),
        item(json!({"uno": {"colour": "x"}}))
    );
    assert_eq!(replaced.fields().collect::<Vec<_>>(), vec!["one", "one.color"]);
}

#[test]
fn replaces_base() {
    let map = nested().with_mapped_field("", Arc::new(FieldMap::new([("one", "eins")])));
    assert_eq!(map.apply_to_field("one"), Mapped::Field("eins".into()));
}

use pretty_assertions::assert_eq;
use serde_json::json;
use strata_core::{map::ConfiguredMap, Map, Mapped, Value};

fn item(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn orders() -> ConfiguredMap {
    ConfiguredMap::from_config(&item(json!({
        "id": "_id",
        "secret": false,
        "customer": {"name": "full_name"},
        "items[]": {"qty": "quantity"}
    })))
    .unwrap()
}

#[test]
fn fields() {
    let map = orders();
    assert_eq!(map.apply_to_field("id"), Mapped::Field("_id".into()));
    assert_eq!(map.apply_to_field("secret"), Mapped::Omit);
    assert_eq!(
        map.apply_to_field("customer.name"),
        Mapped::Field("customer.full_name".into())
    );
    assert_eq!(map.apply_to_field("items.qty"), Mapped::Field("items.quantity".into()));
}

#[test]
fn items() {
    let map = orders();
    let original = item(json!({
        "id": 1,
        "customer": {"name": "Ada"},
        "items": [{"qty": 2}, {"qty": 3}]
    }));

    let stored = map.apply(&original);
    assert_eq!(
        stored,
        item(json!({
            "_id": 1,
            "customer": {"full_name": "Ada"},
            "items": [{"quantity": 2}, {"quantity": 3}]
        }))
    );
    assert_eq!(map.apply_inverse(&stored), original);
}

#[test]
fn deserialize() {
    let map: ConfiguredMap = serde_json::from_value(json!({"id": "_id"})).unwrap();
    assert_eq!(map.apply_to_field("id"), Mapped::Field("_id".into()));
}

#[test]
fn invalid_entries() {
    let err = ConfiguredMap::from_config(&item(json!({"id": 1}))).unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("`id`"));

    let err = ConfiguredMap::from_config(&item(json!({"nested": {"flag": true}}))).unwrap_err();
    assert!(err.is_invalid_schema());

    assert!(serde_json::from_value::<ConfiguredMap>(json!(["id"])).is_err());
}

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use strata_core::{
    map::{DeepMap, FieldMap, SchemaMap},
    opt,
    schema::Embedded,
    Map, Mapped, Opt, Schema, Value,
};

fn item(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn schema() -> Arc<Schema> {
    let schema = Schema::new()
        .with_map("users", Arc::new(FieldMap::new([("id", "_id")])))
        .with_map("posts", Arc::new(FieldMap::new([("id", "_id"), ("title", "subject")])))
        .with_map("addresses", Arc::new(FieldMap::new([("zip", "postcode")])))
        .with_embedded("users", Embedded::many("addresses", "addresses"))
        .with_one_to_many("users", "posts", [("id", "author")])
        .unwrap();

    Arc::new(schema)
}

fn resolved(collection: &str, opts: Vec<Opt>) -> Arc<dyn Map> {
    SchemaMap::new(collection, schema())
        .with_opts(&opts)
        .unwrap()
        .expect("options attach related items")
}

// ---------------------------------------------------------------------------
// Collection map
// ---------------------------------------------------------------------------

#[test]
fn collection_and_embedded_maps() {
    let map = SchemaMap::new("users", schema());

    assert_eq!(map.apply_to_field("id"), Mapped::Field("_id".into()));
    assert_eq!(
        map.apply_to_field("addresses.zip"),
        Mapped::Field("addresses.postcode".into())
    );
    assert_eq!(
        map.apply(&item(json!({"id": 1, "addresses": [{"zip": "1011"}]}))),
        item(json!({"_id": 1, "addresses": [{"postcode": "1011"}]}))
    );
}

#[test]
fn deep_collection_map_splits_filter_values() {
    let schema = Schema::new().with_map("things", Arc::new(DeepMap::new([("foo.type", "foos.type_id")])));
    let map = SchemaMap::new("things", Arc::new(schema));
    let value = item(json!({"type": 1, "name": "x"}));

    assert_eq!(
        map.apply_to_pair("foo", &value),
        Some(vec![
            ("foo".to_string(), item(json!({"name": "x"}))),
            ("foos.type_id".to_string(), Value::from(1)),
        ])
    );
    assert_eq!(
        map.apply(&item(json!({"foo": {"type": 1, "name": "x"}}))),
        item(json!({"foo": {"name": "x"}, "foos": {"type_id": 1}}))
    );
}

#[test]
fn embedded_field_pair_uses_embedded_map() {
    let map = SchemaMap::new("users", schema());

    assert_eq!(
        map.apply_to_pair("addresses.zip", &Value::from("1011")),
        Some(vec![("addresses.postcode".to_string(), Value::from("1011"))])
    );
}

#[test]
fn options_without_relations_change_nothing() {
    let map = SchemaMap::new("users", schema());
    let opts: Vec<Opt> = vec![opt::limit(10).into()];
    assert!(map.with_opts(&opts).unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Related collections
// ---------------------------------------------------------------------------

#[test]
fn lookup_nests_related_map_per_item() {
    let map = resolved("users", vec![opt::lookup("posts").into()]);

    assert_eq!(map.apply_to_field("posts.title"), Mapped::Field("posts.subject".into()));
    assert_eq!(
        map.apply_inverse(&item(json!({"_id": 1, "posts": [{"_id": 10, "subject": "Hi"}]}))),
        item(json!({"id": 1, "posts": [{"id": 10, "title": "Hi"}]}))
    );
}

#[test]
fn lookup_under_other_field_name() {
    let map = resolved("users", vec![opt::lookup("posts").as_field("articles").into()]);
    assert_eq!(
        map.apply_to_field("articles.title"),
        Mapped::Field("articles.subject".into())
    );
}

#[test]
fn hydrate_nests_related_map() {
    let map = resolved("posts", vec![opt::hydrate("author").into()]);

    assert_eq!(
        map.apply(&item(json!({"title": "Hi", "author": {"id": 1}}))),
        item(json!({"subject": "Hi", "author": {"_id": 1}}))
    );
}

#[test]
fn nested_options_nest_deeper() {
    let map = resolved(
        "users",
        vec![opt::lookup("posts").with([opt::hydrate("author")]).into()],
    );

    assert_eq!(
        map.apply(&item(json!({"posts": [{"title": "Hi", "author": {"id": 1}}]}))),
        item(json!({"posts": [{"subject": "Hi", "author": {"_id": 1}}]}))
    );
}

#[test]
fn targeted_option_uses_attached_collection() {
    let map = resolved(
        "posts",
        vec![
            opt::hydrate("author").into(),
            opt::lookup("posts").for_target("author").into(),
        ],
    );

    assert_eq!(
        map.apply_to_field("author.posts.title"),
        Mapped::Field("author.posts.subject".into())
    );
}

#[test]
fn unknown_target_is_an_error() {
    let opts: Vec<Opt> = vec![opt::lookup("posts").for_target("editor").into()];
    let err = SchemaMap::new("users", schema()).with_opts(&opts).unwrap_err();

    assert!(err.is_lookup());
    assert!(err.to_string().contains("lookup `posts`"), "{err}");
}

#[test]
fn unrelated_collection_is_an_error() {
    let opts: Vec<Opt> = vec![opt::lookup("comments").into()];
    let err = SchemaMap::new("users", schema()).with_opts(&opts).unwrap_err();
    assert!(err.to_string().contains("no relationship found"), "{err}");
}

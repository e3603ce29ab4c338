use pretty_assertions::assert_eq;
use strata_core::schema::{Join, Junction, Matches, Relationship, RelationshipKind, Schema};

fn matches(pairs: &[(&str, &str)]) -> Matches {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

fn blog() -> Schema {
    Schema::new()
        .with_one_to_many("users", "posts", [("id", "author")])
        .unwrap()
        .with_many_to_many(
            "posts",
            [("id", "post_id")],
            Junction::new("post_tags", [("tag_id", "id")]),
            "tags",
        )
        .unwrap()
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[test]
fn relationship_is_found_from_both_sides() {
    let schema = blog();

    let forward = schema.relationship("users", "posts", None).unwrap();
    assert_eq!(forward.kind(), RelationshipKind::OneToMany);
    assert_eq!(forward.matches(), &matches(&[("id", "author")]));

    let reverse = schema.relationship("posts", "users", None).unwrap();
    assert_eq!(reverse.kind(), RelationshipKind::ManyToOne);
    assert_eq!(reverse.matches(), &matches(&[("author", "id")]));
    assert_eq!(&reverse.swapped(), forward);
}

#[test]
fn ambiguous_relationship() {
    let schema = blog()
        .with_one_to_many("users", "posts", [("id", "editor")])
        .unwrap();

    let err = schema.relationship("users", "posts", None).unwrap_err();
    assert!(err.is_lookup());
    assert!(err.to_string().contains("multiple relationships found"), "{err}");

    let editor = schema
        .relationship("users", "posts", Some(&matches(&[("id", "editor")])))
        .unwrap();
    assert_eq!(editor.matches(), &matches(&[("id", "editor")]));
}

#[test]
fn missing_relationship() {
    let err = blog().relationship("users", "tags", None).unwrap_err();
    assert!(err.is_lookup());
    assert!(err.to_string().contains("no relationship found"), "{err}");
}

#[test]
fn relationship_for_field() {
    let schema = blog();

    let author = schema.relationship_for_field("posts", "author").unwrap();
    assert_eq!(author.related(), "users");
    assert!(schema.relationship_for_field("posts", "title").is_err());
}

#[test]
fn relationships_of_collection() {
    let schema = blog();
    let related: Vec<_> = schema
        .relationships_of("posts")
        .iter()
        .map(|relationship| relationship.related())
        .collect();

    assert_eq!(related, vec!["users", "tags"]);
    assert!(schema.relationships_of("comments").is_empty());
}

// ---------------------------------------------------------------------------
// Joins
// ---------------------------------------------------------------------------

#[test]
fn direct_join() {
    let relationship = blog().relationship("users", "posts", None).unwrap().clone();
    assert_eq!(
        relationship.joins(),
        vec![Join {
            from: "users".into(),
            to: "posts".into(),
            on: matches(&[("id", "author")]),
        }]
    );
}

#[test]
fn many_to_many_joins_through_junction() {
    let schema = blog();

    let forward = schema.relationship("posts", "tags", None).unwrap();
    assert_eq!(
        forward.joins(),
        vec![
            Join {
                from: "posts".into(),
                to: "post_tags".into(),
                on: matches(&[("id", "post_id")]),
            },
            Join {
                from: "post_tags".into(),
                to: "tags".into(),
                on: matches(&[("tag_id", "id")]),
            },
        ]
    );

    let reverse = schema.relationship("tags", "posts", None).unwrap();
    assert_eq!(reverse.kind(), RelationshipKind::ManyToMany);
    assert_eq!(
        reverse.joins(),
        vec![
            Join {
                from: "tags".into(),
                to: "post_tags".into(),
                on: matches(&[("id", "tag_id")]),
            },
            Join {
                from: "post_tags".into(),
                to: "posts".into(),
                on: matches(&[("post_id", "id")]),
            },
        ]
    );
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn relationship_needs_matches() {
    let err = Relationship::new(
        RelationshipKind::OneToOne,
        "users",
        "profiles",
        Vec::<(String, String)>::new(),
    )
    .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn many_to_many_needs_junction() {
    let err = Relationship::new(RelationshipKind::ManyToMany, "posts", "tags", [("id", "post_id")])
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn unknown_kind() {
    let err = "sideways".parse::<RelationshipKind>().unwrap_err();
    assert!(err.is_invalid_schema());
    assert_eq!(
        "many-to-one".parse::<RelationshipKind>().unwrap(),
        RelationshipKind::ManyToOne
    );
}

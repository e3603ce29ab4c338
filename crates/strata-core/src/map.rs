//! Field maps translate between application field names and storage field
//! names, in both directions.

mod child_map;
mod combined_map;
mod configured_map;
mod deep_map;
mod field_map;
mod nested_map;
mod no_map;
mod schema_map;

pub use child_map::ChildMap;
pub use combined_map::CombinedMap;
pub use configured_map::ConfiguredMap;
pub use deep_map::DeepMap;
pub use field_map::FieldMap;
pub use nested_map::NestedMap;
pub use no_map::NoMap;
pub use schema_map::SchemaMap;

use crate::{Opt, Result, Value};

use std::{fmt, sync::Arc};

/// A shared, immutable field map.
pub type MapRef = Arc<dyn Map>;

/// The outcome of mapping a single application field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
    /// The field is stored under this name
    Field(String),

    /// The field is not stored
    Omit,

    /// The map has no entry for the field; it is stored as is
    Unmapped,
}

/// The right hand side of a rename table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapTarget {
    Field(String),
    Omit,
}

impl MapTarget {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(field) => Some(field),
            Self::Omit => None,
        }
    }
}

impl From<&str> for MapTarget {
    fn from(src: &str) -> Self {
        Self::Field(src.to_string())
    }
}

impl From<String> for MapTarget {
    fn from(src: String) -> Self {
        Self::Field(src)
    }
}

pub trait Map: fmt::Debug + Send + Sync {
    /// Maps an application field path to its storage path.
    fn apply_to_field(&self, field: &str) -> Mapped;

    /// Maps an application item to its storage form.
    ///
    /// Items the map does not touch are returned unchanged, sharing storage
    /// with the input.
    fn apply(&self, item: &Value) -> Value;

    /// Maps a storage item back to its application form.
    fn apply_inverse(&self, item: &Value) -> Value;

    /// Maps a field together with the value it is compared to or assigned.
    ///
    /// Returns `None` when the map has no entry for the field, and an empty
    /// list when the field is dropped. Maps that relocate parts of a nested
    /// value return one pair per destination.
    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        match self.apply_to_field(field) {
            Mapped::Field(field) => Some(vec![(field, value.clone())]),
            Mapped::Omit => Some(vec![]),
            Mapped::Unmapped => None,
        }
    }

    /// Returns a map adjusted to the query options, e.g. with the maps of
    /// looked up collections nested in, or `None` if nothing changes.
    fn with_opts(&self, _opts: &[Opt]) -> Result<Option<MapRef>> {
        Ok(None)
    }

    /// Returns `true` for maps that never change anything.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Whether a map attached at `scope` sees `field`. The empty scope sees
/// every field.
fn covers(scope: &str, field: &str) -> bool {
    scope.is_empty()
        || field
            .strip_prefix(scope)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Runs a field through each scoped map in turn. A map that drops the field
/// ends the chain.
fn chain_field<'a, I>(maps: I, field: &str) -> Mapped
where
    I: IntoIterator<Item = (&'a str, &'a MapRef)>,
{
    let mut current = field.to_string();
    let mut mapped = false;

    for (scope, map) in maps {
        if !covers(scope, &current) {
            continue;
        }
        match map.apply_to_field(&current) {
            Mapped::Field(next) => {
                current = next;
                mapped = true;
            }
            Mapped::Omit => return Mapped::Omit,
            Mapped::Unmapped => {}
        }
    }

    if mapped {
        Mapped::Field(current)
    } else {
        Mapped::Unmapped
    }
}

/// Runs a field and its value through each scoped map in turn. Every pair a
/// map splits the value into is passed on to the next map on its own.
fn chain_pair<'a, I>(maps: I, field: &str, value: &Value) -> Option<Vec<(String, Value)>>
where
    I: IntoIterator<Item = (&'a str, &'a MapRef)>,
{
    let mut pairs = vec![(field.to_string(), value.clone())];
    let mut mapped = false;

    for (scope, map) in maps {
        let mut next = Vec::with_capacity(pairs.len());
        for (field, value) in pairs {
            let split = if covers(scope, &field) {
                map.apply_to_pair(&field, &value)
            } else {
                None
            };
            match split {
                Some(split) => {
                    mapped = true;
                    next.extend(split);
                }
                None => next.push((field, value)),
            }
        }
        pairs = next;
    }

    mapped.then_some(pairs)
}

/// Moves the values at each `from` path to the paired path on a copy of
/// `item`. A `None` destination drops the value.
///
/// All reads happen on the original item and all removals happen before any
/// insertion, so a pair never observes the effect of another pair. Records
/// emptied by a removal are removed as well.
fn relocate<'a, I>(item: &Value, moves: I) -> Value
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>, Value)>,
{
    let mut removals = vec![];
    let mut inserts = vec![];

    for (from, to, value) in moves {
        removals.push(from);
        if let Some(to) = to {
            inserts.push((to, value));
        }
    }

    if removals.is_empty() {
        return item.clone();
    }

    removals.sort_by_key(|path| std::cmp::Reverse(depth(path)));
    inserts.sort_by_key(|(path, _)| depth(path));

    let mut item = item.clone();
    for path in removals {
        item.remove_path(path);
        prune_emptied(&mut item, path);
    }
    for (path, value) in inserts {
        item.set_path(path, value);
    }
    item
}

/// Removes the records left empty by removing `path`.
fn prune_emptied(item: &mut Value, mut path: &str) {
    while let Some((parent, _)) = path.rsplit_once('.') {
        let emptied = item
            .get_path(parent)
            .and_then(Value::as_record)
            .is_some_and(|record| record.is_empty());
        if !emptied {
            break;
        }
        item.remove_path(parent);
        path = parent;
    }
}

fn depth(path: &str) -> usize {
    path.matches('.').count()
}

/// Splits `field` into its first segment and the rest.
fn split_first(field: &str) -> (&str, Option<&str>) {
    match field.split_once('.') {
        Some((first, rest)) => (first, Some(rest)),
        None => (field, None),
    }
}

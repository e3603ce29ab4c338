use super::{field_map::map_target, FieldMap, Map, MapRef, Mapped, NestedMap};
use crate::{Error, Opt, Record, Result, Value};

use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// A map built from configuration.
///
/// ```text
/// {
///     "name": "full_name",        // rename
///     "password": false,          // never stored
///     "address": {"zip": "postcode"},
///     "items[]": {"qty": "quantity"}
/// }
/// ```
///
/// Nested objects become child maps; `[]` applies one to each element.
#[derive(Debug, Clone)]
pub struct ConfiguredMap {
    map: NestedMap,
}

impl ConfiguredMap {
    pub fn from_config(config: &Value) -> Result<Self> {
        match config {
            Value::Record(record) => Ok(Self {
                map: build(record)?,
            }),
            other => Err(Error::invalid_schema(format!(
                "map configuration must be a record, got {other:?}"
            ))),
        }
    }
}

fn build(config: &Record) -> Result<NestedMap> {
    let mut pairs = vec![];
    let mut children = vec![];

    for (field, value) in config {
        match value {
            Value::Record(child) => children.push((field, build(child)?)),
            other => pairs.push((field.clone(), map_target(field, other)?)),
        }
    }

    let base = NestedMap::new(Arc::new(FieldMap::new(pairs)));
    Ok(children.into_iter().fold(base, |map, (field, child)| {
        map.with_mapped_field(field, Arc::new(child))
    }))
}

impl Map for ConfiguredMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        self.map.apply_to_field(field)
    }

    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        self.map.apply_to_pair(field, value)
    }

    fn apply(&self, item: &Value) -> Value {
        self.map.apply(item)
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        self.map.apply_inverse(item)
    }

    fn with_opts(&self, opts: &[Opt]) -> Result<Option<MapRef>> {
        self.map.with_opts(opts)
    }
}

impl<'de> Deserialize<'de> for ConfiguredMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let config = Value::deserialize(deserializer)?;
        ConfiguredMap::from_config(&config).map_err(serde::de::Error::custom)
    }
}

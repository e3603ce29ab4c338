use super::{relocate, split_first, Map, MapTarget, Mapped};
use crate::{Error, Record, Result, Value};

use indexmap::IndexMap;

/// A flat rename table keyed by top-level field names.
///
/// Renaming a field renames everything below it: with `{"name": "full_name"}`,
/// `name.first` maps to `full_name.first`.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    map: IndexMap<String, MapTarget>,
    inverse: IndexMap<String, MapTarget>,
}

impl FieldMap {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MapTarget>,
    {
        let map: IndexMap<String, MapTarget> = pairs
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
        let inverse = invert(&map);

        Self { map, inverse }
    }

    /// Builds a map from a record of `field => "name"` or `field => false` entries.
    pub fn from_record(record: &Record) -> Result<Self> {
        let pairs = record
            .iter()
            .map(|(from, to)| Ok((from.clone(), map_target(from, to)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(pairs))
    }

    pub fn get(&self, field: &str) -> Option<&MapTarget> {
        self.map.get(field)
    }

    /// Returns the map that undoes this one.
    pub fn inverse(&self) -> FieldMap {
        FieldMap {
            map: self.inverse.clone(),
            inverse: self.map.clone(),
        }
    }

    fn field(map: &IndexMap<String, MapTarget>, field: &str) -> Mapped {
        let (first, rest) = split_first(field);
        match map.get(first) {
            None => Mapped::Unmapped,
            Some(MapTarget::Omit) => Mapped::Omit,
            Some(MapTarget::Field(to)) => Mapped::Field(match rest {
                Some(rest) => format!("{to}.{rest}"),
                None => to.clone(),
            }),
        }
    }

    fn remap(map: &IndexMap<String, MapTarget>, item: &Value) -> Value {
        relocate(
            item,
            map.iter().filter_map(|(from, to)| {
                let value = item.get_path(from)?;
                Some((from.as_str(), to.as_field(), value.clone()))
            }),
        )
    }
}

impl Map for FieldMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        Self::field(&self.map, field)
    }

    fn apply(&self, item: &Value) -> Value {
        Self::remap(&self.map, item)
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        Self::remap(&self.inverse, item)
    }
}

/// Dropped fields have no inverse entry.
pub(super) fn invert(map: &IndexMap<String, MapTarget>) -> IndexMap<String, MapTarget> {
    map.iter()
        .filter_map(|(from, to)| Some((to.as_field()?.to_string(), MapTarget::from(from.as_str()))))
        .collect()
}

pub(super) fn map_target(field: &str, value: &Value) -> Result<MapTarget> {
    match value {
        Value::String(to) => Ok(MapTarget::Field(to.clone())),
        Value::Bool(false) => Ok(MapTarget::Omit),
        other => Err(Error::invalid_schema(format!(
            "field map entry `{field}` must be a field name or `false`, got {other:?}"
        ))),
    }
}

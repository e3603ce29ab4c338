use super::{field_map::invert, field_map::map_target, relocate, Map, MapTarget, Mapped};
use crate::{Record, Result, Value};

use indexmap::IndexMap;

/// A rename table keyed by dotted paths.
///
/// `{"foo.type": "foos.type_id"}` moves a nested field, and everything below
/// it, to another location. Paths may be written with `/` or `.`. A path that
/// is mapped while one of its parents is mapped as well goes to its own
/// destination; the parent's value moves without it.
#[derive(Debug, Clone, Default)]
pub struct DeepMap {
    map: IndexMap<String, MapTarget>,
    inverse: IndexMap<String, MapTarget>,
}

impl DeepMap {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<MapTarget>,
    {
        let map: IndexMap<String, MapTarget> = pairs
            .into_iter()
            .map(|(from, to)| {
                let to = match to.into() {
                    MapTarget::Field(to) => MapTarget::Field(normalize(&to)),
                    MapTarget::Omit => MapTarget::Omit,
                };
                (normalize(from.as_ref()), to)
            })
            .collect();
        let inverse = invert(&map);

        Self { map, inverse }
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        let pairs = record
            .iter()
            .map(|(from, to)| Ok((from.clone(), map_target(from, to)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(pairs))
    }

    pub fn inverse(&self) -> DeepMap {
        DeepMap {
            map: self.inverse.clone(),
            inverse: self.map.clone(),
        }
    }

    fn field(map: &IndexMap<String, MapTarget>, field: &str) -> Mapped {
        let field = normalize(field);

        let found = std::iter::once((field.as_str(), None))
            .chain(
                field
                    .rmatch_indices('.')
                    .map(|(index, _)| (&field[..index], Some(&field[index + 1..]))),
            )
            .find_map(|(prefix, rest)| Some((map.get(prefix)?, rest)));

        match found {
            None => Mapped::Unmapped,
            Some((MapTarget::Omit, _)) => Mapped::Omit,
            Some((MapTarget::Field(to), None)) => Mapped::Field(to.clone()),
            Some((MapTarget::Field(to), Some(rest))) => Mapped::Field(format!("{to}.{rest}")),
        }
    }

    fn remap(map: &IndexMap<String, MapTarget>, item: &Value) -> Value {
        let present: Vec<(&str, &MapTarget)> = map
            .iter()
            .filter(|(from, _)| item.contains_path(from))
            .map(|(from, to)| (from.as_str(), to))
            .collect();

        relocate(
            item,
            present.iter().map(|&(from, to)| {
                let mut value = item.get_path(from).cloned().unwrap_or_default();

                // Mapped descendants travel to their own destinations
                for &(other, _) in &present {
                    if let Some(rest) = other.strip_prefix(from).and_then(|r| r.strip_prefix('.')) {
                        value.remove_path(rest);
                    }
                }

                (from, to.as_field(), value)
            }),
        )
    }

    fn remap_pair(
        map: &IndexMap<String, MapTarget>,
        field: &str,
        value: &Value,
    ) -> Option<Vec<(String, Value)>> {
        let field = normalize(field);
        let mapped = Self::field(map, &field);
        let prefix = format!("{field}.");

        let nested: Vec<&MapTarget> = map
            .iter()
            .filter_map(|(from, to)| {
                let rest = from.strip_prefix(&prefix)?;
                value.contains_path(rest).then_some(to)
            })
            .collect();

        if nested.is_empty() || !value.is_record() {
            return match mapped {
                Mapped::Field(to) => Some(vec![(to, value.clone())]),
                Mapped::Omit => Some(vec![]),
                Mapped::Unmapped => None,
            };
        }

        let mut destinations: Vec<String> = nested
            .iter()
            .filter_map(|to| to.as_field().map(str::to_string))
            .collect();
        match mapped {
            Mapped::Field(to) => destinations.insert(0, to),
            Mapped::Unmapped => destinations.insert(0, field.clone()),
            Mapped::Omit => {}
        }

        let mut wrapper = Value::Record(Record::new());
        wrapper.set_path(&field, value.clone());
        let mapped_item = Self::remap(map, &wrapper);

        let pairs = destinations
            .iter()
            .filter(|path| {
                !destinations.iter().any(|other| {
                    path.strip_prefix(other.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
                })
            })
            .filter_map(|path| Some((path.clone(), mapped_item.get_path(path)?.clone())))
            .collect();

        Some(pairs)
    }
}

impl Map for DeepMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        Self::field(&self.map, field)
    }

    fn apply(&self, item: &Value) -> Value {
        Self::remap(&self.map, item)
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        Self::remap(&self.inverse, item)
    }

    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        Self::remap_pair(&self.map, field, value)
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches(|c| c == '/' || c == '.').replace('/', ".")
}

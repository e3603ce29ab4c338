use super::{chain_field, chain_pair, ChildMap, Map, MapRef, Mapped, NoMap};
use crate::{Opt, Result, Value};

use std::{collections::BTreeMap, sync::Arc};

/// A base map plus child maps attached at field paths.
///
/// Items are mapped deepest path first so that a child sees its own field
/// names before any parent renames them. Fields go through the maps whose
/// path they fall under in the same order, so `one.color` under a child
/// `{color: colour}` and a base `{one: uno}` becomes `uno.colour`.
#[derive(Debug, Clone)]
pub struct NestedMap {
    maps: BTreeMap<String, MapRef>,
}

impl NestedMap {
    pub fn new(base: MapRef) -> Self {
        Self {
            maps: BTreeMap::from([(String::new(), base)]),
        }
    }

    /// Returns a copy with `map` applied at `field`, replacing any map
    /// already there. `items[]` applies it to each element. An empty field
    /// replaces the base map.
    pub fn with_mapped_field(&self, field: &str, map: MapRef) -> Self {
        let mut maps = self.maps.clone();

        if field.is_empty() {
            maps.insert(String::new(), map);
        } else {
            let child = ChildMap::new(field, map);
            maps.insert(child.field().to_string(), Arc::new(child));
        }

        Self { maps }
    }

    pub fn base(&self) -> &MapRef {
        &self.maps[""]
    }

    /// The map attached at `field`, without the `[]` suffix.
    pub fn get(&self, field: &str) -> Option<&MapRef> {
        self.maps.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.maps.keys().map(String::as_str).filter(|key| !key.is_empty())
    }

    /// Maps with the path they apply at, deepest first.
    fn scoped(&self) -> impl Iterator<Item = (&str, &MapRef)> + '_ {
        self.maps.iter().rev().map(|(key, map)| (key.as_str(), map))
    }
}

impl Default for NestedMap {
    fn default() -> Self {
        Self::new(Arc::new(NoMap))
    }
}

impl Map for NestedMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        chain_field(self.scoped(), field)
    }

    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        chain_pair(self.scoped(), field, value)
    }

    fn apply(&self, item: &Value) -> Value {
        self.maps
            .values()
            .rev()
            .fold(item.clone(), |item, map| map.apply(&item))
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        self.maps
            .values()
            .fold(item.clone(), |item, map| map.apply_inverse(&item))
    }

    fn with_opts(&self, opts: &[Opt]) -> Result<Option<MapRef>> {
        let mut changed = false;
        let mut maps = BTreeMap::new();

        for (key, map) in &self.maps {
            let map = match map.with_opts(opts)? {
                Some(map) => {
                    changed = true;
                    map
                }
                None => map.clone(),
            };
            maps.insert(key.clone(), map);
        }

        Ok(changed.then(|| Arc::new(NestedMap { maps }) as MapRef))
    }

    fn is_identity(&self) -> bool {
        self.maps.values().all(|map| map.is_identity())
    }
}

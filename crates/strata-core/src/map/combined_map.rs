use super::{chain_field, chain_pair, Map, MapRef, Mapped};
use crate::{Opt, Result, Value};

use std::sync::Arc;

/// Runs several maps one after the other.
///
/// Fields, and the values paired with them in filters and updates, go
/// through each map in turn; a map that drops the field ends the chain. Items are mapped in declared order in both directions.
#[derive(Debug, Clone, Default)]
pub struct CombinedMap {
    maps: Vec<MapRef>,
}

impl CombinedMap {
    pub fn new(maps: Vec<MapRef>) -> Self {
        Self { maps }
    }

    pub fn maps(&self) -> &[MapRef] {
        &self.maps
    }
}

impl Map for CombinedMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        chain_field(self.maps.iter().map(|map| ("", map)), field)
    }

    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        chain_pair(self.maps.iter().map(|map| ("", map)), field, value)
    }

    fn apply(&self, item: &Value) -> Value {
        self.maps
            .iter()
            .fold(item.clone(), |item, map| map.apply(&item))
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        self.maps
            .iter()
            .fold(item.clone(), |item, map| map.apply_inverse(&item))
    }

    fn with_opts(&self, opts: &[Opt]) -> Result<Option<MapRef>> {
        let mut changed = false;
        let mut maps = Vec::with_capacity(self.maps.len());

        for map in &self.maps {
            match map.with_opts(opts)? {
                Some(map) => {
                    changed = true;
                    maps.push(map);
                }
                None => maps.push(map.clone()),
            }
        }

        Ok(changed.then(|| Arc::new(CombinedMap { maps }) as MapRef))
    }

    fn is_identity(&self) -> bool {
        self.maps.iter().all(|map| map.is_identity())
    }
}

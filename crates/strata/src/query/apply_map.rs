use super::{priority, Compose, Items};
use strata_core::{opt, FilterItem, Map, MapRef, Opt, Record, Result, UpdateInstruction, Value};

/// The field map for a query: the `map` setting adjusted to the options.
///
/// Returns `None` when no map is set or the map changes nothing.
pub fn active_map(opts: &[Opt]) -> Result<Option<MapRef>> {
    let Some(map) = opt::find_map(opts) else {
        return Ok(None);
    };

    let map = map.with_opts(opts)?.unwrap_or(map);
    Ok((!map.is_identity()).then_some(map))
}

/// Renames filter fields to storage fields. Dropped fields are removed
/// from the filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyMapToFilter;

impl<A> Compose<FilterItem, A> for ApplyMapToFilter {
    fn priority(&self) -> i32 {
        priority::MAP
    }

    fn prepare<'a>(
        &'a self,
        items: Items<'a, FilterItem>,
        opts: &mut Vec<Opt>,
    ) -> Result<Items<'a, FilterItem>> {
        let Some(map) = active_map(opts)? else {
            return Ok(items);
        };

        Ok(Box::new(items.flat_map(move |item| {
            let mapped = match item {
                Ok(item) => map_filter_item(&*map, item).into_iter().map(Ok).collect(),
                Err(err) => vec![Err(err)],
            };
            mapped.into_iter()
        })))
    }
}

fn map_filter_item(map: &dyn Map, item: FilterItem) -> Vec<FilterItem> {
    let Some(pairs) = map.apply_to_pair(item.field(), item.value()) else {
        return vec![item];
    };

    if let [(field, value)] = pairs.as_slice() {
        if field == item.field() && value.is_same(item.value()) {
            return vec![item];
        }
    }

    let operator = item.operator().to_string();
    pairs
        .into_iter()
        .map(|(field, value)| FilterItem::new(field, operator.clone(), value))
        .collect()
}

/// Renames the fields of update instructions. Instructions left without
/// any field are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyMapToUpdate;

impl<A> Compose<UpdateInstruction, A> for ApplyMapToUpdate {
    fn priority(&self) -> i32 {
        priority::MAP
    }

    fn prepare<'a>(
        &'a self,
        items: Items<'a, UpdateInstruction>,
        opts: &mut Vec<Opt>,
    ) -> Result<Items<'a, UpdateInstruction>> {
        let Some(map) = active_map(opts)? else {
            return Ok(items);
        };

        Ok(Box::new(items.filter_map(move |item| match item {
            Ok(instruction) => map_instruction(&*map, instruction).map(Ok),
            Err(err) => Some(Err(err)),
        })))
    }
}

fn map_instruction(map: &dyn Map, instruction: UpdateInstruction) -> Option<UpdateInstruction> {
    let mut changed = false;
    let mut pairs = Record::new();

    for (field, value) in instruction.pairs() {
        match map.apply_to_pair(field, value) {
            None => {
                pairs.insert(field.clone(), value.clone());
            }
            Some(mapped) => {
                changed |= !matches!(
                    mapped.as_slice(),
                    [(to, to_value)] if to == field && to_value.is_same(value)
                );
                for (to, to_value) in mapped {
                    pairs.insert(to, to_value);
                }
            }
        }
    }

    if !changed {
        return Some(instruction);
    }

    (!pairs.is_empty()).then(|| instruction.with_pairs(pairs))
}

/// Maps items to storage form, or back with [`ApplyMapToItems::inverse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyMapToItems {
    inverse: bool,
}

impl ApplyMapToItems {
    pub fn new() -> Self {
        Self { inverse: false }
    }

    /// Maps storage items to application items.
    pub fn inverse() -> Self {
        Self { inverse: true }
    }
}

impl<A> Compose<Value, A> for ApplyMapToItems {
    fn priority(&self) -> i32 {
        priority::MAP
    }

    fn prepare<'a>(&'a self, items: Items<'a, Value>, opts: &mut Vec<Opt>) -> Result<Items<'a, Value>> {
        let Some(map) = active_map(opts)? else {
            return Ok(items);
        };

        let inverse = self.inverse;
        Ok(Box::new(items.map(move |item| {
            item.map(|item| {
                if inverse {
                    map.apply_inverse(&item)
                } else {
                    map.apply(&item)
                }
            })
        })))
    }
}

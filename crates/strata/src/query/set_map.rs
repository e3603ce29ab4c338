use super::{priority, Compose, Items};
use strata_core::{
    map::NoMap,
    opt::{self, Setting, SettingOption, MAP_SETTING},
    MapRef, Opt, Result,
};

use std::sync::Arc;

type MapFn = Arc<dyn Fn(MapRef, &[Opt]) -> Result<MapRef> + Send + Sync>;

/// Sets the `map` option before the map is applied.
pub struct SetMap {
    set: MapFn,
    priority: i32,
}

impl SetMap {
    /// Always use `map`.
    pub fn to(map: MapRef) -> Self {
        Self::with(move |_, _| Ok(map.clone()))
    }

    /// Computes the map from the current one, `NoMap` when none is set.
    pub fn with<F>(f: F) -> Self
    where
        F: Fn(MapRef, &[Opt]) -> Result<MapRef> + Send + Sync + 'static,
    {
        Self {
            set: Arc::new(f),
            priority: priority::SET_MAP,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }
}

impl<T, A> Compose<T, A> for SetMap {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn prepare<'a>(&'a self, items: Items<'a, T>, opts: &mut Vec<Opt>) -> Result<Items<'a, T>> {
        let current = opt::find_map(opts).unwrap_or_else(|| Arc::new(NoMap));
        let map = (self.set)(current, opts)?;
        opt::replace_setting(opts, SettingOption::new(MAP_SETTING, Setting::Map(map)));
        Ok(items)
    }
}

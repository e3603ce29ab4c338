//! Query options: projection, sorting, paging, related-collection lookups
//! and free-form settings passed alongside a filter.

mod conflict;
mod fields;
mod limit;
mod relation;
mod setting;
mod sort;

pub use conflict::{ConflictResolution, ConflictResolutionOption};
pub use fields::FieldsOption;
pub use limit::LimitOption;
pub use relation::{HydrateOption, LookupOption};
pub use setting::{FlagOption, Setting, SettingOption};
pub use sort::{SortField, SortOption};

use crate::{MapRef, Value};

/// A query option.
#[derive(Debug, Clone, PartialEq)]
pub enum Opt {
    Fields(FieldsOption),
    Sort(SortOption),
    Limit(LimitOption),
    Lookup(LookupOption),
    Hydrate(HydrateOption),
    Setting(SettingOption),
    Flag(FlagOption),
    ConflictResolution(ConflictResolutionOption),
}

/// The name of the setting holding the active field map.
pub const MAP_SETTING: &str = "map";

/// Only return the given fields.
pub fn fields<I, S>(fields: I) -> FieldsOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldsOption::include(fields)
}

/// Return all fields except the given ones.
pub fn omit<I, S>(fields: I) -> FieldsOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldsOption::exclude(fields)
}

/// Sort by the given fields. A leading `~` sorts descending.
pub fn sort<I, S>(fields: I) -> SortOption
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SortOption::parse(fields)
}

pub fn limit(limit: usize) -> LimitOption {
    LimitOption::new(limit, 0)
}

pub fn limit_offset(limit: usize, offset: usize) -> LimitOption {
    LimitOption::new(limit, offset)
}

/// Limit to page `page` (starting at 1) of `page_size` items.
pub fn page(page: usize, page_size: usize) -> LimitOption {
    LimitOption::page(page, page_size)
}

/// Attach items of a related collection under the collection's name.
pub fn lookup(related: impl Into<String>) -> LookupOption {
    LookupOption::new(related)
}

/// Replace a foreign key field by the item it refers to.
pub fn hydrate(field: impl Into<String>) -> HydrateOption {
    HydrateOption::new(field)
}

pub fn setting(name: impl Into<String>, value: impl Into<Value>) -> SettingOption {
    SettingOption::new(name, Setting::Value(value.into()))
}

/// Use `map` as the field map for the query.
pub fn map_setting(map: MapRef) -> SettingOption {
    SettingOption::new(MAP_SETTING, Setting::Map(map))
}

pub fn flag(name: impl Into<String>) -> FlagOption {
    FlagOption::new(name)
}

pub fn on_conflict(resolution: ConflictResolution) -> ConflictResolutionOption {
    ConflictResolutionOption::new(resolution)
}

/// Returns `true` when the projections in `opts` let `field` through.
///
/// Without any projection every field is included. Include lists must name
/// the field or one of its parents; any exclude list naming the field, or
/// one of its parents, drops it.
pub fn includes_field(opts: &[Opt], field: &str) -> bool {
    let mut included = true;

    for opt in opts {
        let Opt::Fields(projection) = opt else {
            continue;
        };

        if projection.is_negated() {
            if projection.covers(field) {
                return false;
            }
        } else if !projection.covers(field) {
            included = false;
        }
    }

    included
}

/// Returns the last setting called `name`.
pub fn find_setting<'a>(opts: &'a [Opt], name: &str) -> Option<&'a Setting> {
    opts.iter().rev().find_map(|opt| match opt {
        Opt::Setting(setting) if setting.name() == name => Some(setting.value()),
        _ => None,
    })
}

/// Returns the active field map, if any option sets one.
pub fn find_map(opts: &[Opt]) -> Option<MapRef> {
    match find_setting(opts, MAP_SETTING)? {
        Setting::Map(map) => Some(map.clone()),
        Setting::Value(_) => None,
    }
}

/// Replaces the last setting with the same name, or appends it.
pub fn replace_setting(opts: &mut Vec<Opt>, setting: SettingOption) {
    let existing = opts
        .iter_mut()
        .rev()
        .find(|opt| matches!(opt, Opt::Setting(current) if current.name() == setting.name()));

    match existing {
        Some(opt) => *opt = Opt::Setting(setting),
        None => opts.push(Opt::Setting(setting)),
    }
}

pub fn has_flag(opts: &[Opt], name: &str) -> bool {
    opts.iter()
        .any(|opt| matches!(opt, Opt::Flag(flag) if flag.name() == name))
}

/// Returns the last limit option.
pub fn find_limit(opts: &[Opt]) -> Option<&LimitOption> {
    opts.iter().rev().find_map(|opt| match opt {
        Opt::Limit(limit) => Some(limit),
        _ => None,
    })
}

macro_rules! impl_into_opt {
    ( $( $option:ident => $variant:ident, )* ) => {
        $(
            impl From<$option> for Opt {
                fn from(src: $option) -> Opt {
                    Opt::$variant(src)
                }
            }
        )*
    };
}

impl_into_opt! {
    FieldsOption => Fields,
    SortOption => Sort,
    LimitOption => Limit,
    LookupOption => Lookup,
    HydrateOption => Hydrate,
    SettingOption => Setting,
    FlagOption => Flag,
    ConflictResolutionOption => ConflictResolution,
}

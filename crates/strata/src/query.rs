//! Composable pipelines that turn filters, update instructions and items
//! into a backend's native query form.
//!
//! A [`Composer`] holds steps ordered by priority. Running it has three
//! phases:
//!
//! 1. *prepare*: every step may rewrite the item stream and the options,
//!    e.g. parse filter keys, nest lookups or map field names;
//! 2. *apply*: each item passes through the steps one after the other until
//!    a step consumes it into the accumulator;
//! 3. *finalize*: every step may add to the accumulator once all items are in.

mod apply_map;
pub use apply_map::{active_map, ApplyMapToFilter, ApplyMapToItems, ApplyMapToUpdate};

mod composer;
pub use composer::{Applied, Composer};

mod custom_field;
pub use custom_field::CustomField;

mod custom_filter;
pub use custom_filter::CustomFilter;

mod custom_operator;
pub use custom_operator::CustomOperator;

mod filter_parser;
pub use filter_parser::{parse_key, FilterParser};

mod nest_lookup;
pub use nest_lookup::{nest_lookups, NestLookup};

mod set_map;
pub use set_map::SetMap;

mod stage;
pub use stage::{Finalization, Preparation};

use strata_core::{FilterItem, Opt, Result, UpdateInstruction};

/// A fallible, lazily evaluated stream of items.
pub type Items<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Default priorities of the built-in steps. Lower runs first.
pub mod priority {
    pub const PARSE: i32 = 100;
    pub const NEST_LOOKUP: i32 = 200;
    pub const SET_MAP: i32 = 250;
    pub const MAP: i32 = 300;
    pub const PREPARE: i32 = 500;
    pub const CUSTOM: i32 = 700;
    pub const FINALIZE: i32 = 900;
}

/// A step of a [`Composer`] working on items of type `T` and building an
/// accumulator of type `A`, typically a backend query.
pub trait Compose<T, A>: Send + Sync {
    fn priority(&self) -> i32;

    fn prepare<'a>(&'a self, items: Items<'a, T>, _opts: &mut Vec<Opt>) -> Result<Items<'a, T>> {
        Ok(items)
    }

    /// Handles one item. Items pushed to `next` continue to the following
    /// steps; an item that is not pushed is consumed.
    fn apply(&self, _acc: &mut A, item: T, _opts: &[Opt], next: &mut Next<T>) -> Result<()> {
        next.push(item);
        Ok(())
    }

    fn finalize(&self, _acc: &mut A, _opts: &[Opt]) -> Result<()> {
        Ok(())
    }
}

/// Collects the items a step passes on.
#[derive(Debug)]
pub struct Next<T> {
    items: Vec<T>,
}

impl<T> Next<T> {
    fn new() -> Self {
        Self { items: vec![] }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }
}

/// Items that carry an operator, which custom operator steps dispatch on.
pub trait Operation {
    fn operator(&self) -> &str;
}

impl Operation for FilterItem {
    fn operator(&self) -> &str {
        FilterItem::operator(self)
    }
}

impl Operation for UpdateInstruction {
    fn operator(&self) -> &str {
        UpdateInstruction::operator(self)
    }
}

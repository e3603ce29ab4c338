use super::{priority, Compose, Next};
use strata_core::{FilterItem, Opt, Result};

use std::sync::Arc;

pub(super) type Handler<T, A> = Arc<dyn Fn(&mut A, T, &[Opt], &mut Next<T>) -> Result<()> + Send + Sync>;

enum Matcher {
    Field(String),
    Predicate(Arc<dyn Fn(&FilterItem) -> bool + Send + Sync>),
}

/// Hands matching filter items to a custom handler.
///
/// The handler receives the item and decides what happens to it: add a
/// condition to the query, push a rewritten item to `next`, or both.
/// Items that do not match continue unchanged.
pub struct CustomFilter<A> {
    matcher: Matcher,
    handler: Handler<FilterItem, A>,
    priority: i32,
}

impl<A> CustomFilter<A> {
    /// Handles items on `field`.
    pub fn field<F>(field: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut A, FilterItem, &[Opt], &mut Next<FilterItem>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            matcher: Matcher::Field(field.into()),
            handler: Arc::new(handler),
            priority: priority::CUSTOM,
        }
    }

    /// Handles items for which `predicate` returns `true`.
    pub fn when<P, F>(predicate: P, handler: F) -> Self
    where
        P: Fn(&FilterItem) -> bool + Send + Sync + 'static,
        F: Fn(&mut A, FilterItem, &[Opt], &mut Next<FilterItem>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            matcher: Matcher::Predicate(Arc::new(predicate)),
            handler: Arc::new(handler),
            priority: priority::CUSTOM,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }

    fn matches(&self, item: &FilterItem) -> bool {
        match &self.matcher {
            Matcher::Field(field) => item.field() == field,
            Matcher::Predicate(predicate) => predicate(item),
        }
    }
}

impl<A> Compose<FilterItem, A> for CustomFilter<A> {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, acc: &mut A, item: FilterItem, opts: &[Opt], next: &mut Next<FilterItem>) -> Result<()> {
        if self.matches(&item) {
            (self.handler)(acc, item, opts, next)
        } else {
            next.push(item);
            Ok(())
        }
    }
}

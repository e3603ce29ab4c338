use super::{custom_filter::Handler, priority, Compose, Next};
use strata_core::{opt, FilterItem, Opt, Result};

use std::sync::Arc;

type FinalizeHandler<A> = Arc<dyn Fn(&mut A, &[Opt]) -> Result<()> + Send + Sync>;

/// A computed field: filters on it go to a custom handler, and a finalize
/// handler adds it to the query when the projection includes it.
pub struct CustomField<A> {
    field: String,
    filter: Option<Handler<FilterItem, A>>,
    finalize: Option<FinalizeHandler<A>>,
    priority: i32,
}

impl<A> CustomField<A> {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            filter: None,
            finalize: None,
            priority: priority::CUSTOM,
        }
    }

    pub fn on_filter<F>(self, handler: F) -> Self
    where
        F: Fn(&mut A, FilterItem, &[Opt], &mut Next<FilterItem>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            filter: Some(Arc::new(handler)),
            ..self
        }
    }

    pub fn on_finalize<F>(self, handler: F) -> Self
    where
        F: Fn(&mut A, &[Opt]) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            finalize: Some(Arc::new(handler)),
            ..self
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }
}

impl<A> Compose<FilterItem, A> for CustomField<A> {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, acc: &mut A, item: FilterItem, opts: &[Opt], next: &mut Next<FilterItem>) -> Result<()> {
        match &self.filter {
            Some(handler) if item.field() == self.field => handler(acc, item, opts, next),
            _ => {
                next.push(item);
                Ok(())
            }
        }
    }

    fn finalize(&self, acc: &mut A, opts: &[Opt]) -> Result<()> {
        match &self.finalize {
            Some(handler) if opt::includes_field(opts, &self.field) => handler(acc, opts),
            _ => Ok(()),
        }
    }
}

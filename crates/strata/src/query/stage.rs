use super::{priority, Compose, Items};
use strata_core::{Opt, Result};

use std::sync::Arc;

type PrepareFn<T> =
    Arc<dyn for<'a> Fn(Items<'a, T>, &mut Vec<Opt>) -> Result<Items<'a, T>> + Send + Sync>;

/// A prepare-phase step built from a function.
pub struct Preparation<T> {
    prepare: PrepareFn<T>,
    priority: i32,
}

impl<T> Preparation<T> {
    pub fn new<F>(prepare: F) -> Self
    where
        F: for<'a> Fn(Items<'a, T>, &mut Vec<Opt>) -> Result<Items<'a, T>> + Send + Sync + 'static,
    {
        Self {
            prepare: Arc::new(prepare),
            priority: priority::PREPARE,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }
}

impl<T, A> Compose<T, A> for Preparation<T> {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn prepare<'a>(&'a self, items: Items<'a, T>, opts: &mut Vec<Opt>) -> Result<Items<'a, T>> {
        (self.prepare)(items, opts)
    }
}

/// A finalize-phase step built from a function.
pub struct Finalization<A> {
    finalize: Arc<dyn Fn(&mut A, &[Opt]) -> Result<()> + Send + Sync>,
    priority: i32,
}

impl<A> Finalization<A> {
    pub fn new<F>(finalize: F) -> Self
    where
        F: Fn(&mut A, &[Opt]) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            finalize: Arc::new(finalize),
            priority: priority::FINALIZE,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }
}

impl<T, A> Compose<T, A> for Finalization<A> {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn finalize(&self, acc: &mut A, opts: &[Opt]) -> Result<()> {
        (self.finalize)(acc, opts)
    }
}

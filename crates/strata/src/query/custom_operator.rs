use super::{custom_filter::Handler, priority, Compose, Next, Operation};
use strata_core::{Opt, Result};

use std::sync::Arc;

/// Hands items with a given operator to a custom handler. Works for filter
/// items and update instructions alike.
pub struct CustomOperator<T, A> {
    operator: String,
    handler: Handler<T, A>,
    priority: i32,
}

impl<T, A> CustomOperator<T, A> {
    pub fn new<F>(operator: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut A, T, &[Opt], &mut Next<T>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            operator: operator.into(),
            handler: Arc::new(handler),
            priority: priority::CUSTOM,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }
}

impl<T: Operation, A> Compose<T, A> for CustomOperator<T, A> {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, acc: &mut A, item: T, opts: &[Opt], next: &mut Next<T>) -> Result<()> {
        if item.operator() == self.operator {
            (self.handler)(acc, item, opts, next)
        } else {
            next.push(item);
            Ok(())
        }
    }
}

use super::{Compose, Items, Next};
use strata_core::{Error, Opt, Result};

use std::{collections::VecDeque, fmt, sync::Arc};

/// An ordered set of [`Compose`] steps.
///
/// Steps run in ascending priority; steps with equal priority keep the order
/// they were added in. Composers are immutable, `with` returns a new one.
pub struct Composer<T, A> {
    steps: Vec<Arc<dyn Compose<T, A>>>,
}

impl<T: 'static, A: 'static> Composer<T, A> {
    pub fn new() -> Self {
        Self { steps: vec![] }
    }

    /// Returns a composer with `step` added.
    pub fn with(&self, step: impl Compose<T, A> + 'static) -> Self {
        self.with_arc(Arc::new(step))
    }

    pub fn with_arc(&self, step: Arc<dyn Compose<T, A>>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self::from_steps(steps)
    }

    /// Returns a composer with the steps of `other` merged in.
    pub fn with_composer(&self, other: &Composer<T, A>) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(other.steps.iter().cloned());
        Self::from_steps(steps)
    }

    pub fn from_steps(mut steps: Vec<Arc<dyn Compose<T, A>>>) -> Self {
        steps.sort_by_key(|step| step.priority());
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs the prepare phase of every step, threading the item stream and
    /// the options through them.
    pub fn prepare<'a>(&'a self, items: Items<'a, T>, opts: &mut Vec<Opt>) -> Result<Items<'a, T>> {
        self.steps
            .iter()
            .try_fold(items, |items, step| step.prepare(items, opts))
    }

    /// Runs the apply phase lazily. The returned iterator yields the items
    /// no step consumed.
    pub fn apply<'a>(&'a self, acc: &'a mut A, items: Items<'a, T>, opts: &'a [Opt]) -> Applied<'a, T, A> {
        Applied {
            steps: &self.steps,
            acc,
            items,
            opts,
            pending: VecDeque::new(),
        }
    }

    pub fn finalize(&self, acc: &mut A, opts: &[Opt]) -> Result<()> {
        self.steps
            .iter()
            .try_for_each(|step| step.finalize(acc, opts))
    }

    /// Runs all three phases. Every item must be consumed by some step.
    pub fn compose<I>(&self, acc: &mut A, items: I, opts: &mut Vec<Opt>) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        T: fmt::Debug,
    {
        let items: Items<'_, T> = Box::new(items.into_iter().map(Ok));
        let items = self.prepare(items, opts)?;

        tracing::trace!(steps = self.steps.len(), opts = opts.len(), "composing");

        if let Some(leftover) = self.apply(acc, items, opts).next() {
            let leftover = leftover?;
            tracing::debug!(?leftover, "item not handled by any composer step");
            return Err(Error::unsupported_feature(format!(
                "no composer step handles {leftover:?}"
            )));
        }

        self.finalize(acc, opts)
    }
}

impl<T, A> Clone for Composer<T, A> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<T: 'static, A: 'static> Default for Composer<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> fmt::Debug for Composer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field(
                "priorities",
                &self.steps.iter().map(|step| step.priority()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The apply phase of a [`Composer`], driven one item at a time.
pub struct Applied<'a, T, A> {
    steps: &'a [Arc<dyn Compose<T, A>>],
    acc: &'a mut A,
    items: Items<'a, T>,
    opts: &'a [Opt],
    pending: VecDeque<T>,
}

impl<T, A> Iterator for Applied<'_, T, A> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(Ok(item));
            }

            let item = match self.items.next()? {
                Ok(item) => item,
                Err(err) => return Some(Err(err)),
            };

            if let Err(err) = run_steps(self.steps, self.acc, item, self.opts, &mut self.pending) {
                return Some(Err(err));
            }
        }
    }
}

fn run_steps<T, A>(
    steps: &[Arc<dyn Compose<T, A>>],
    acc: &mut A,
    item: T,
    opts: &[Opt],
    out: &mut VecDeque<T>,
) -> Result<()> {
    let Some((step, rest)) = steps.split_first() else {
        out.push_back(item);
        return Ok(());
    };

    let mut next = Next::new();
    step.apply(acc, item, opts, &mut next)?;

    for item in next.items {
        run_steps(rest, acc, item, opts, out)?;
    }

    Ok(())
}

use strata_core::Result;

/// Runs triggers for entities going through a gateway.
pub trait Dispatcher<E>: Send + Sync {
    /// Called for each entity fetched, so the entity can fire triggers
    /// later on.
    fn attach(&self, entity: &mut E);

    /// Fires `event` for `entity`, e.g. `before-save`.
    fn trigger(&self, _event: &str, _entity: &mut E) -> Result<()> {
        Ok(())
    }
}

/// A dispatcher without triggers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDispatch;

impl<E> Dispatcher<E> for NoDispatch {
    fn attach(&self, _entity: &mut E) {}
}

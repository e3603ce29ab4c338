//! Gateways are the storage-facing side of a collection: they fetch, count,
//! save, update and delete items.

mod blackhole;
pub use blackhole::Blackhole;

mod composite;
pub use composite::{CompositeGateway, BEFORE_SAVE};

mod dispatcher;
pub use dispatcher::{Dispatcher, NoDispatch};

mod multi_write;
pub use multi_write::MultiWrite;

mod no_write;
pub use no_write::NoWrite;

mod source;
pub use source::Source;

mod unsupported;
pub use unsupported::Unsupported;

use crate::QueryResult;
use strata_core::{opt, Filter, Opt, Result, UpdateInstruction};

use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Gateway<E>: Send + Sync
where
    E: Send + 'static,
{
    async fn fetch(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    async fn count(&self, filter: Filter, opts: Vec<Opt>) -> Result<u64>;

    async fn save(&self, item: E, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    async fn save_all(&self, items: Vec<E>, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    async fn update(
        &self,
        filter: Filter,
        update: Vec<UpdateInstruction>,
        opts: Vec<Opt>,
    ) -> Result<QueryResult<E>>;

    async fn delete(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    /// Fetches the first matching item.
    async fn fetch_one(&self, filter: Filter, mut opts: Vec<Opt>) -> Result<Option<E>> {
        opts.push(opt::limit(1).into());
        self.fetch(filter, opts).await?.first()
    }
}

/// The reading half of a gateway.
#[async_trait]
pub trait Read<E>: Send + Sync
where
    E: Send + 'static,
{
    async fn fetch(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    async fn count(&self, filter: Filter, opts: Vec<Opt>) -> Result<u64>;

    /// Returns a copy of this service bound to `source`, or `None` when the
    /// service does not depend on its source.
    fn with_source(&self, _source: &Source) -> Option<Arc<dyn Read<E>>> {
        None
    }
}

/// The writing half of a gateway.
#[async_trait]
pub trait Write<E>: Send + Sync
where
    E: Send + 'static,
{
    async fn save(&self, item: E, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    async fn save_all(&self, items: Vec<E>, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    async fn update(
        &self,
        filter: Filter,
        update: Vec<UpdateInstruction>,
        opts: Vec<Opt>,
    ) -> Result<QueryResult<E>>;

    async fn delete(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>>;

    /// Returns a copy of this service bound to `source`, or `None` when the
    /// service does not depend on its source.
    fn with_source(&self, _source: &Source) -> Option<Arc<dyn Write<E>>> {
        None
    }
}

use super::{Dispatcher, Gateway, NoDispatch, Read, Source, Write};
use crate::QueryResult;
use strata_core::{Filter, Opt, Result, UpdateInstruction};

use async_trait::async_trait;
use std::sync::Arc;

pub const BEFORE_SAVE: &str = "before-save";

/// A gateway assembled from a read service, a write service and a trigger
/// dispatcher, all working on one source.
pub struct CompositeGateway<E> {
    source: Source,
    read: Arc<dyn Read<E>>,
    write: Arc<dyn Write<E>>,
    dispatcher: Arc<dyn Dispatcher<E>>,
}

impl<E: Send + 'static> CompositeGateway<E> {
    /// Services that depend on their source are rebound to `source`.
    pub fn new(source: Source, read: Arc<dyn Read<E>>, write: Arc<dyn Write<E>>) -> Self {
        let read = read.with_source(&source).unwrap_or(read);
        let write = write.with_source(&source).unwrap_or(write);

        Self {
            source,
            read,
            write,
            dispatcher: Arc::new(NoDispatch),
        }
    }

    pub fn with_dispatcher(self, dispatcher: Arc<dyn Dispatcher<E>>) -> Self {
        Self { dispatcher, ..self }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Attaches the dispatcher to every fetched entity.
    fn prepare_entities(&self, result: QueryResult<E>) -> QueryResult<E> {
        let dispatcher = self.dispatcher.clone();
        result.map(move |mut entity| {
            dispatcher.attach(&mut entity);
            entity
        })
    }
}

#[async_trait]
impl<E: Send + 'static> Gateway<E> for CompositeGateway<E> {
    async fn fetch(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        tracing::debug!(collection = self.source.collection(), "fetch");
        let result = self.read.fetch(filter, opts).await?;
        Ok(self.prepare_entities(result))
    }

    async fn count(&self, filter: Filter, opts: Vec<Opt>) -> Result<u64> {
        tracing::debug!(collection = self.source.collection(), "count");
        self.read.count(filter, opts).await
    }

    async fn save(&self, mut item: E, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        tracing::debug!(collection = self.source.collection(), "save");
        self.dispatcher.trigger(BEFORE_SAVE, &mut item)?;
        self.write.save(item, opts).await
    }

    async fn save_all(&self, mut items: Vec<E>, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        tracing::debug!(collection = self.source.collection(), items = items.len(), "save all");
        for item in &mut items {
            self.dispatcher.trigger(BEFORE_SAVE, item)?;
        }
        self.write.save_all(items, opts).await
    }

    async fn update(
        &self,
        filter: Filter,
        update: Vec<UpdateInstruction>,
        opts: Vec<Opt>,
    ) -> Result<QueryResult<E>> {
        tracing::debug!(collection = self.source.collection(), "update");
        self.write.update(filter, update, opts).await
    }

    async fn delete(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        tracing::debug!(collection = self.source.collection(), "delete");
        self.write.delete(filter, opts).await
    }
}

use super::{Gateway, Read, Write};
use crate::QueryResult;
use strata_core::{Error, Filter, Opt, Result, UpdateInstruction};

use async_trait::async_trait;
use std::marker::PhantomData;

/// A gateway, or service, that refuses every operation.
pub struct Unsupported<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Unsupported<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for Unsupported<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported(operation: &str) -> Error {
    Error::unsupported_feature(format!("{operation} is not supported by this gateway"))
}

#[async_trait]
impl<E: Send + 'static> Read<E> for Unsupported<E> {
    async fn fetch(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(unsupported("fetch"))
    }

    async fn count(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<u64> {
        Err(unsupported("count"))
    }
}

#[async_trait]
impl<E: Send + 'static> Write<E> for Unsupported<E> {
    async fn save(&self, _item: E, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(unsupported("save"))
    }

    async fn save_all(&self, _items: Vec<E>, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(unsupported("save_all"))
    }

    async fn update(
        &self,
        _filter: Filter,
        _update: Vec<UpdateInstruction>,
        _opts: Vec<Opt>,
    ) -> Result<QueryResult<E>> {
        Err(unsupported("update"))
    }

    async fn delete(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(unsupported("delete"))
    }
}

#[async_trait]
impl<E: Send + 'static> Gateway<E> for Unsupported<E> {
    async fn fetch(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Read::fetch(self, filter, opts).await
    }

    async fn count(&self, filter: Filter, opts: Vec<Opt>) -> Result<u64> {
        Read::count(self, filter, opts).await
    }

    async fn save(&self, item: E, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Write::save(self, item, opts).await
    }

    async fn save_all(&self, items: Vec<E>, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Write::save_all(self, items, opts).await
    }

    async fn update(
        &self,
        filter: Filter,
        update: Vec<UpdateInstruction>,
        opts: Vec<Opt>,
    ) -> Result<QueryResult<E>> {
        Write::update(self, filter, update, opts).await
    }

    async fn delete(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Write::delete(self, filter, opts).await
    }
}

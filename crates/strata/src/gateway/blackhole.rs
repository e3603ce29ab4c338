use super::{Gateway, Read, Write};
use crate::QueryResult;
use strata_core::{Filter, Opt, Record, Result, UpdateInstruction};

use async_trait::async_trait;
use std::marker::PhantomData;

/// A gateway that stores nothing. Reads find nothing, saves hand the items
/// back, updates and deletes affect nothing.
pub struct Blackhole<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Blackhole<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for Blackhole<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Blackhole<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Blackhole")
    }
}

fn nothing_affected<E: Send + 'static>() -> QueryResult<E> {
    QueryResult::empty().with_meta([("count", 0)].into_iter().collect::<Record>())
}

#[async_trait]
impl<E: Send + 'static> Read<E> for Blackhole<E> {
    async fn fetch(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Ok(QueryResult::empty())
    }

    async fn count(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<u64> {
        Ok(0)
    }
}

#[async_trait]
impl<E: Send + 'static> Write<E> for Blackhole<E> {
    async fn save(&self, item: E, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Ok(QueryResult::from_vec(vec![item]))
    }

    async fn save_all(&self, items: Vec<E>, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Ok(QueryResult::from_vec(items))
    }

    async fn update(
        &self,
        _filter: Filter,
        _update: Vec<UpdateInstruction>,
        _opts: Vec<Opt>,
    ) -> Result<QueryResult<E>> {
        Ok(nothing_affected())
    }

    async fn delete(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Ok(nothing_affected())
    }
}

#[async_trait]
impl<E: Send + 'static> Gateway<E> for Blackhole<E> {
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

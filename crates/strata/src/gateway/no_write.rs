use super::Write;
use crate::QueryResult;
use strata_core::{Error, Filter, Opt, Result, UpdateInstruction};

use async_trait::async_trait;

/// The write service of a read-only gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWrite;

fn read_only() -> Error {
    Error::unsupported_feature("gateway is read-only")
}

#[async_trait]
impl<E: Send + 'static> Write<E> for NoWrite {
    async fn save(&self, _item: E, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(read_only())
    }

    async fn save_all(&self, _items: Vec<E>, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(read_only())
    }

    async fn update(
        &self,
        _filter: Filter,
        _update: Vec<UpdateInstruction>,
        _opts: Vec<Opt>,
    ) -> Result<QueryResult<E>> {
        Err(read_only())
    }

    async fn delete(&self, _filter: Filter, _opts: Vec<Opt>) -> Result<QueryResult<E>> {
        Err(read_only())
    }
}

use super::Gateway;
use crate::QueryResult;
use strata_core::{Filter, Opt, Result, UpdateInstruction};

use async_trait::async_trait;
use std::sync::Arc;

/// Writes to several gateways in a chain.
///
/// A save goes to the primary gateway first; the items it returns are then
/// saved to each further gateway in turn, so generated fields such as ids
/// carry over. Reads only use the primary gateway. Updates and deletes run
/// on every gateway and return the primary's result.
pub struct MultiWrite<E> {
    primary: Arc<dyn Gateway<E>>,
    secondaries: Vec<Arc<dyn Gateway<E>>>,
}

impl<E: Send + 'static> MultiWrite<E> {
    pub fn new(primary: Arc<dyn Gateway<E>>) -> Self {
        Self {
            primary,
            secondaries: vec![],
        }
    }

    pub fn with(mut self, gateway: Arc<dyn Gateway<E>>) -> Self {
        self.secondaries.push(gateway);
        self
    }

    async fn forward(&self, mut result: QueryResult<E>, opts: &[Opt]) -> Result<QueryResult<E>> {
        for (index, gateway) in self.secondaries.iter().enumerate() {
            let items = result.into_vec()?;
            tracing::debug!(gateway = index + 1, items = items.len(), "forwarding saved items");
            result = gateway.save_all(items, opts.to_vec()).await?;
        }
        Ok(result)
    }
}

#[async_trait]
impl<E: Send + 'static> Gateway<E> for MultiWrite<E> {
    async fn fetch(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        self.primary.fetch(filter, opts).await
    }

    async fn count(&self, filter: Filter, opts: Vec<Opt>) -> Result<u64> {
        self.primary.count(filter, opts).await
    }

    async fn save(&self, item: E, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        let result = self.primary.save(item, opts.clone()).await?;
        self.forward(result, &opts).await
    }

    async fn save_all(&self, items: Vec<E>, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        let result = self.primary.save_all(items, opts.clone()).await?;
        self.forward(result, &opts).await
    }

    async fn update(
        &self,
        filter: Filter,
        update: Vec<UpdateInstruction>,
        opts: Vec<Opt>,
    ) -> Result<QueryResult<E>> {
        tracing::debug!(gateways = self.secondaries.len() + 1, "update");
        let result = self
            .primary
            .update(filter.clone(), update.clone(), opts.clone())
            .await?;
        for gateway in &self.secondaries {
            gateway
                .update(filter.clone(), update.clone(), opts.clone())
                .await?;
        }
        Ok(result)
    }

    async fn delete(&self, filter: Filter, opts: Vec<Opt>) -> Result<QueryResult<E>> {
        tracing::debug!(gateways = self.secondaries.len() + 1, "delete");
        let result = self.primary.delete(filter.clone(), opts.clone()).await?;
        for gateway in &self.secondaries {
            gateway.delete(filter.clone(), opts.clone()).await?;
        }
        Ok(result)
    }
}

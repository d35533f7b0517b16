use log::{debug, info};

use crate::errors::AncestryError;
use crate::esplora::{EsploraApi, Transaction};

/// Collects every transaction of a block by paging through the explorer.
///
/// The returned records keep the explorer's `txindex` values untouched; the
/// ancestry calculator looks parents up by those values, so callers must not
/// filter or renumber them in between.
pub struct BlockDataFetcher<A> {
    api: A,
}

impl<A: EsploraApi> BlockDataFetcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the transactions of the block at `height`, starting at
    /// `start_index` and continuing until the explorer returns an empty page.
    pub async fn get_block_transactions(
        &self,
        height: u64,
        start_index: u64,
    ) -> Result<Vec<Transaction>, AncestryError> {
        let block_hash = self.api.get_block_hash(height).await?;
        info!("Block {} has hash {}", height, block_hash);

        let mut transactions = Vec::new();
        let mut offset = start_index;
        loop {
            let batch = self.api.get_block_txs(&block_hash, offset).await?;
            if batch.is_empty() {
                break;
            }
            debug!("Received {} transactions at offset {}", batch.len(), offset);

            offset += batch.len() as u64;
            transactions.extend(batch);
        }

        info!("Fetched {} transactions from block {}", transactions.len(), height);
        Ok(transactions)
    }
}

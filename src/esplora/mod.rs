pub mod client;
pub mod types;

use async_trait::async_trait;
use bitcoin::BlockHash;

use crate::errors::AncestryError;
pub use client::EsploraClient;
pub use types::{Transaction, TxInput, TxOutput};

/// Block explorer endpoints the fetcher needs.
#[async_trait]
pub trait EsploraApi: Send + Sync {
    /// Resolve a block height to its hash.
    async fn get_block_hash(&self, height: u64) -> Result<BlockHash, AncestryError>;

    /// One page of a block's transactions, starting at `start_index`.
    /// An empty page means there is nothing left to fetch.
    async fn get_block_txs(
        &self,
        block_hash: &BlockHash,
        start_index: u64,
    ) -> Result<Vec<Transaction>, AncestryError>;
}

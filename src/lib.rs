pub mod ancestry;
pub mod errors;
pub mod esplora;
pub mod fetcher;
pub mod report;
pub mod settings;

use ancestry::{AncestryCalculator, TransactionAncestry};
use errors::AncestryError;
use esplora::EsploraApi;
use fetcher::BlockDataFetcher;

/// Fetch a block, resolve every transaction's direct inputs and return the
/// `top` transactions with the most of them.
pub async fn run<A: EsploraApi>(
    fetcher: &BlockDataFetcher<A>,
    height: u64,
    start_index: u64,
    top: usize,
) -> Result<Vec<TransactionAncestry>, AncestryError> {
    let transactions = fetcher.get_block_transactions(height, start_index).await?;
    let ancestries = AncestryCalculator::new().calculate_ancestries(&transactions)?;
    Ok(report::rank(ancestries, top))
}

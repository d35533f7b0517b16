use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AncestryError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response code {status} from {url}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid block hash {hash:?}: {reason}")]
    InvalidBlockHash { hash: String, reason: String },
    #[error("Transaction {txid} spends from unknown txindex {txindex}")]
    Lookup { txid: String, txindex: u64 },
    #[error("Output {vout} of transaction {txid} is out of range (it has {len} outputs)")]
    IndexOutOfRange { txid: String, vout: u32, len: usize },
}

#[cfg(test)]
impl AncestryError {
    /// True for failures talking to the explorer, as opposed to bad data.
    pub fn is_network(&self) -> bool {
        matches!(self, AncestryError::Network(_) | AncestryError::HttpStatus { .. })
    }
}

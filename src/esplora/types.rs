use serde::Deserialize;

/// A transaction as returned by `/block/{hash}/txs/{offset}`.
///
/// `txindex` is assigned by the data source. Inputs refer to their parent by
/// this value, so every index an input names must belong to a fetched record.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub txid: String,
    pub txindex: u64,
    pub vin: Vec<TxInput>,
    pub vout: Vec<TxOutput>,
}

/// Reference to a previous output being spent.
#[derive(Debug, Clone, Deserialize)]
pub struct TxInput {
    /// Parent transaction id
    pub txid: String,
    /// Output index in the parent
    pub vout: u32,
    /// The parent's `txindex`
    pub txindex: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxOutput {
    /// Missing for non-standard scripts
    #[serde(default)]
    pub scriptpubkey_address: Option<String>,
}

#[cfg(test)]
impl TxOutput {
    pub fn with_address(address: &str) -> Self {
        Self {
            scriptpubkey_address: Some(address.to_string()),
        }
    }
}

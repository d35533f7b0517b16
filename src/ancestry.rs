use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::errors::AncestryError;
use crate::esplora::Transaction;

/// An output spent by a transaction, with the address it was locked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub txid: String,
    pub vout: u32,
    /// Empty when the explorer could not decode an address
    pub address: String,
}

impl fmt::Display for Ancestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.txid, self.vout, self.address)
    }
}

/// Direct inputs of one transaction. Only the first generation is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionAncestry {
    pub txid: String,
    pub ancestors: Vec<Ancestor>,
}

impl TransactionAncestry {
    pub fn new(txid: String, ancestors: Vec<Ancestor>) -> Self {
        Self { txid, ancestors }
    }

    pub fn size(&self) -> usize {
        self.ancestors.len()
    }
}

#[derive(Debug, Default)]
pub struct AncestryCalculator;

impl AncestryCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the direct inputs of every transaction, in input order.
    ///
    /// Parents are found through the `txindex` each input carries, so every
    /// referenced index must belong to one of `transactions`. When two records
    /// share a `txindex` the later one wins.
    pub fn calculate_ancestries(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<TransactionAncestry>, AncestryError> {
        let mut tx_by_index: HashMap<u64, &Transaction> = HashMap::with_capacity(transactions.len());
        for tx in transactions {
            tx_by_index.insert(tx.txindex, tx);
        }
        debug!(
            "Indexed {} transactions under {} distinct txindex values",
            transactions.len(),
            tx_by_index.len()
        );

        transactions
            .iter()
            .map(|tx| -> Result<TransactionAncestry, AncestryError> {
                let ancestors = tx
                    .vin
                    .iter()
                    .map(|input| -> Result<Ancestor, AncestryError> {
                        let parent = tx_by_index.get(&input.txindex).ok_or_else(|| {
                            debug!("Transaction {} spends from unknown txindex {}", tx.txid, input.txindex);
                            AncestryError::Lookup {
                                txid: tx.txid.clone(),
                                txindex: input.txindex,
                            }
                        })?;

                        let output = parent.vout.get(input.vout as usize).ok_or_else(|| {
                            debug!("Output {} of {} does not exist", input.vout, parent.txid);
                            AncestryError::IndexOutOfRange {
                                txid: parent.txid.clone(),
                                vout: input.vout,
                                len: parent.vout.len(),
                            }
                        })?;

                        Ok(Ancestor {
                            txid: input.txid.clone(),
                            vout: input.vout,
                            address: output.scriptpubkey_address.clone().unwrap_or_default(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(TransactionAncestry::new(tx.txid.clone(), ancestors))
            })
            .collect()
    }
}

use crate::ancestry::TransactionAncestry;

pub const DEFAULT_TOP: usize = 10;

/// Order by number of direct inputs, largest first. The sort is stable so
/// transactions with equal counts keep the order the block gave them.
pub fn rank(mut ancestries: Vec<TransactionAncestry>, top: usize) -> Vec<TransactionAncestry> {
    ancestries.sort_by(|a, b| b.size().cmp(&a.size()));
    ancestries.truncate(top);
    ancestries
}

/// One `txid count` line per entry
pub fn format_lines(ancestries: &[TransactionAncestry]) -> Vec<String> {
    ancestries
        .iter()
        .map(|ancestry| format!("{} {}", ancestry.txid, ancestry.size()))
        .collect()
}

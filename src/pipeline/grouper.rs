use std::collections::HashMap;

use super::extractor::extract_transfers;
use crate::model::RawTransaction;
use crate::model::TokenEventRecord;

/// Token mint -> that wallet's events for the mint, iterated in first-seen mint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroups {
    buckets: HashMap<String, Vec<TokenEventRecord>>,
    order: Vec<String>,
}

impl TokenGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        record: TokenEventRecord,
    ) {
        match self.buckets.get_mut(&record.mint) {
            Some(bucket) => bucket.push(record),
            None => {
                self.order.push(record.mint.clone());
                self.buckets.insert(record.mint.clone(), vec![record]);
            },
        }
    }

    pub fn get(
        &self,
        mint: &str,
    ) -> Option<&[TokenEventRecord]> {
        self.buckets.get(mint).map(Vec::as_slice)
    }

    pub fn mints(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TokenEventRecord])> {
        self.order
            .iter()
            .filter_map(|mint| self.buckets.get(mint).map(|records| (mint.as_str(), records.as_slice())))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    fn sort_buckets(&mut self) {
        // sort_by_key is stable, ties keep batch order; a missing block time sorts first
        for records in self.buckets.values_mut() {
            records.sort_by_key(|record| record.block_time);
        }
    }
}

/// Buckets the wallet's transfers by mint, each bucket in ascending block time order.
///
/// The wallet must already be validated by the caller.
pub fn group_by_token(
    transactions: &[RawTransaction],
    wallet_address: &str,
) -> TokenGroups {
    let mut groups = TokenGroups::new();

    for transaction in transactions {
        for transfer in extract_transfers(transaction) {
            if !transfer.is_owned_by(wallet_address) {
                continue;
            }

            groups.push(TokenEventRecord {
                signature: transaction.signature.clone(),
                slot: transaction.slot,
                block_time: transaction.block_time,
                direction: transfer.direction,
                amount: transfer.amount,
                mint: transfer.mint,
            });
        }
    }

    groups.sort_buckets();
    groups
}

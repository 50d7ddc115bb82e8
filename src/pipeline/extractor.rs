use std::collections::HashMap;

use crate::model::RawTransaction;
use crate::model::TransferDirection;
use crate::model::TransferEvent;

#[derive(Debug)]
struct BalanceChange<'a> {
    mint: &'a str,
    owner: Option<&'a str>,
    pre_amount: f64,
    post_amount: f64,
}

/// Diffs pre/post token balances per (account index, mint) and returns every non-zero change.
///
/// Keys seen only in the post balances count as a change from zero, keys seen only in the
/// pre balances as a change to zero. The owner comes from the last pre entry for a key, or
/// from the post entry when the key has no pre entry. Events come out in first-seen key order.
pub fn extract_transfers(transaction: &RawTransaction) -> Vec<TransferEvent> {
    let Some(balances) = &transaction.token_balances else {
        return Vec::new();
    };

    let mut index: HashMap<(u8, &str), usize> = HashMap::new();
    let mut changes: Vec<BalanceChange<'_>> = Vec::new();

    for pre in &balances.pre {
        let key = (pre.account_index, pre.mint.as_str());
        match index.get(&key) {
            Some(&position) => {
                let change = &mut changes[position];
                change.owner = pre.owner.as_deref();
                change.pre_amount = pre.amount;
            },
            None => {
                index.insert(key, changes.len());
                changes.push(BalanceChange {
                    mint: &pre.mint,
                    owner: pre.owner.as_deref(),
                    pre_amount: pre.amount,
                    post_amount: 0.0,
                });
            },
        }
    }

    for post in &balances.post {
        let key = (post.account_index, post.mint.as_str());
        match index.get(&key) {
            Some(&position) => changes[position].post_amount = post.amount,
            None => {
                index.insert(key, changes.len());
                changes.push(BalanceChange {
                    mint: &post.mint,
                    owner: post.owner.as_deref(),
                    pre_amount: 0.0,
                    post_amount: post.amount,
                });
            },
        }
    }

    changes
        .into_iter()
        .filter_map(|change| {
            let delta = change.post_amount - change.pre_amount;
            // exact comparison, the amounts are already normalized by the node
            if delta == 0.0 {
                return None;
            }

            Some(TransferEvent {
                mint: change.mint.to_string(),
                owner: change.owner.map(str::to_string),
                amount: delta.abs(),
                direction: TransferDirection::from_delta(delta),
            })
        })
        .collect()
}

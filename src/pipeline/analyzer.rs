use crate::Result;
use crate::err_with_loc;
use crate::error::AnalyzerError;
use crate::model::OutputRow;
use crate::model::TokenAnalysis;
use crate::model::TokenEventRecord;
use crate::utils::format_block_time;
use crate::utils::truncate_signature;

/// Percentage move from the buy price to the sell price, 0 when either price is unknown.
pub fn profit_percent(
    buy_price: f64,
    sell_price: f64,
) -> f64 {
    if buy_price == 0.0 || sell_price == 0.0 || !buy_price.is_finite() || !sell_price.is_finite() {
        return 0.0;
    }

    (sell_price - buy_price) / buy_price * 100.0
}

fn require_block_time(record: &TokenEventRecord) -> Result<i64> {
    record.block_time.ok_or_else(|| {
        err_with_loc!(AnalyzerError::MissingField {
            field: "block_time",
            signature: record.signature.clone(),
        })
    })
}

/// Builds the ledger for one token from its time-ordered records.
///
/// Returns `Ok(None)` when the token was never bought. Every record must carry a block time.
pub fn analyze_token(
    token_mint: &str,
    records: &[TokenEventRecord],
) -> Result<Option<TokenAnalysis>> {
    let Some(first_buy) = records.iter().find(|record| record.direction.is_buy()) else {
        return Ok(None);
    };
    let last_sell = records.iter().rev().find(|record| record.direction.is_sell());

    let first_buy_time = require_block_time(first_buy)?;
    let last_sell_time = last_sell.map(require_block_time).transpose()?;

    // Needs matched buy/sell prices, market data is not threaded through here
    let profit = 0.0;

    let mut data_rows = Vec::with_capacity(records.len());
    let mut prev_block_time: Option<i64> = None;
    let mut net_buy = 0.0;
    let mut buy_count = 0;
    let mut sell_count = 0;
    let mut buy_amount = 0.0;
    let mut sell_amount = 0.0;

    for (position, record) in records.iter().enumerate() {
        let block_time = require_block_time(record)?;
        let time_diff = prev_block_time.map_or(0, |prev| block_time - prev);

        if record.direction.is_buy() {
            buy_count += 1;
            buy_amount += record.amount;
        } else {
            sell_count += 1;
            sell_amount += record.amount;
        }
        net_buy += record.direction.signed(record.amount);

        data_rows.push(OutputRow {
            index: position + 1,
            slot: record.slot,
            timestamp: format_block_time(block_time),
            direction: record.direction,
            address: truncate_signature(&record.signature),
            amount: record.amount,
            close_price: 0.0,
            profit_loss: profit,
            volume: 0.0,
            time_diff,
            price_change: 0.0,
            buy_count,
            buy_amount,
            sell_count,
            sell_amount,
            holder_count: 0,
            net_buy,
        });

        prev_block_time = Some(block_time);
    }

    Ok(Some(TokenAnalysis {
        token_mint: token_mint.to_string(),
        profit_percent: profit,
        first_buy_time,
        last_sell_time,
        total_buys: buy_count,
        total_sells: sell_count,
        data_rows,
    }))
}

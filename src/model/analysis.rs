use serde::Serialize;
use serde::Serializer;

use super::transfer::TransferDirection;

fn fixed_6<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.6}", value))
}

fn fixed_2<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

/// One ledger line. Field order is the exported column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRow {
    pub index: usize,
    pub slot: u64,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub direction: TransferDirection,
    /// Truncated transaction signature.
    pub address: String,
    #[serde(serialize_with = "fixed_6")]
    pub amount: f64,
    #[serde(serialize_with = "fixed_2")]
    pub close_price: f64,
    #[serde(serialize_with = "fixed_2")]
    pub profit_loss: f64,
    #[serde(serialize_with = "fixed_2")]
    pub volume: f64,
    pub time_diff: i64,
    #[serde(serialize_with = "fixed_2")]
    pub price_change: f64,
    pub buy_count: usize,
    #[serde(serialize_with = "fixed_6")]
    pub buy_amount: f64,
    pub sell_count: usize,
    #[serde(serialize_with = "fixed_6")]
    pub sell_amount: f64,
    pub holder_count: u64,
    #[serde(serialize_with = "fixed_6")]
    pub net_buy: f64,
}

impl OutputRow {
    pub fn net_amount(&self) -> f64 {
        self.direction.signed(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAnalysis {
    pub token_mint: String,
    pub profit_percent: f64,
    pub first_buy_time: i64,
    pub last_sell_time: Option<i64>,
    pub total_buys: usize,
    pub total_sells: usize,
    pub data_rows: Vec<OutputRow>,
}

impl TokenAnalysis {
    pub fn has_rows(&self) -> bool {
        !self.data_rows.is_empty()
    }

    pub fn final_net_buy(&self) -> f64 {
        self.data_rows.last().map(|row| row.net_buy).unwrap_or_default()
    }
}

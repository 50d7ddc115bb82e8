use std::fmt;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferDirection {
    Buy,
    Sell,
}

impl TransferDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 { TransferDirection::Buy } else { TransferDirection::Sell }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, TransferDirection::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, TransferDirection::Sell)
    }

    /// `+amount` for a buy, `-amount` for a sell.
    pub fn signed(
        &self,
        amount: f64,
    ) -> f64 {
        match self {
            TransferDirection::Buy => amount,
            TransferDirection::Sell => -amount,
        }
    }
}

impl fmt::Display for TransferDirection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            TransferDirection::Buy => write!(f, "Buy"),
            TransferDirection::Sell => write!(f, "Sell"),
        }
    }
}

/// A non-zero token balance change for one account within one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub mint: String,
    pub owner: Option<String>,
    pub amount: f64,
    pub direction: TransferDirection,
}

impl TransferEvent {
    pub fn is_owned_by(
        &self,
        wallet: &str,
    ) -> bool {
        self.owner.as_deref() == Some(wallet)
    }

    pub fn signed_amount(&self) -> f64 {
        self.direction.signed(self.amount)
    }
}

/// A transfer owned by the target wallet, with its transaction context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEventRecord {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub direction: TransferDirection,
    pub amount: f64,
    pub mint: String,
}

use serde::Deserialize;
use serde::Serialize;

/// One entry of a transaction's pre or post token balance list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub account_index: u8,
    pub mint: String,
    pub owner: Option<String>,
    /// Normalized (decimals applied) token quantity.
    pub amount: f64,
}

impl TokenBalance {
    pub fn new(
        account_index: u8,
        mint: impl Into<String>,
        owner: Option<String>,
        amount: f64,
    ) -> Self {
        Self {
            account_index,
            mint: mint.into(),
            owner,
            amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceSnapshots {
    pub pre: Vec<TokenBalance>,
    pub post: Vec<TokenBalance>,
}

/// A fetched transaction together with the context it was listed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub err: Option<String>,
    /// `None` when the transaction lacks pre or post token balance metadata.
    pub token_balances: Option<TokenBalanceSnapshots>,
}

impl RawTransaction {
    pub fn new(
        signature: impl Into<String>,
        slot: u64,
        block_time: Option<i64>,
    ) -> Self {
        Self {
            signature: signature.into(),
            slot,
            block_time,
            err: None,
            token_balances: None,
        }
    }

    pub fn with_balances(
        mut self,
        pre: Vec<TokenBalance>,
        post: Vec<TokenBalance>,
    ) -> Self {
        self.token_balances = Some(TokenBalanceSnapshots { pre, post });
        self
    }

    pub fn is_failed(&self) -> bool {
        self.err.is_some()
    }
}

/// Entry returned by a signature listing, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub err: Option<String>,
}

impl SignatureInfo {
    pub fn new(
        signature: impl Into<String>,
        slot: u64,
        block_time: Option<i64>,
    ) -> Self {
        Self {
            signature: signature.into(),
            slot,
            block_time,
            err: None,
        }
    }
}

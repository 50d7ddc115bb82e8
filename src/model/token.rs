use serde::Deserialize;
use serde::Serialize;

pub const UNKNOWN_TOKEN_SYMBOL: &str = "UNKNOWN";
pub const UNKNOWN_TOKEN_NAME: &str = "Unknown Token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default)]
    pub address: String,
    #[serde(default = "unknown_symbol")]
    pub symbol: String,
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<f64>,
    #[serde(default)]
    pub holder: Option<u64>,
}

fn unknown_symbol() -> String {
    UNKNOWN_TOKEN_SYMBOL.to_string()
}

fn unknown_name() -> String {
    UNKNOWN_TOKEN_NAME.to_string()
}

impl TokenMetadata {
    /// Placeholder returned whenever market data is unavailable.
    pub fn unknown(address: &str) -> Self {
        Self {
            address: address.to_string(),
            symbol: unknown_symbol(),
            name: unknown_name(),
            decimals: None,
            price: None,
            liquidity: None,
            holder: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.symbol == UNKNOWN_TOKEN_SYMBOL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub unix_time: i64,
    pub value: f64,
}

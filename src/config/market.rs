use serde::Deserialize;
use serde::Serialize;

use crate::constants::BIRDEYE_API_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl MarketDataConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BIRDEYE_API_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_RATE_LIMIT_DELAY_MS;
use crate::constants::DEFAULT_SIGNATURE_LIMIT;
use crate::constants::MAX_SIGNATURES_PER_REQUEST;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub target_wallet: Option<String>,
    pub signature_limit: usize,
    pub rate_limit_delay_ms: u64,
    pub page_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            target_wallet: None,
            signature_limit: DEFAULT_SIGNATURE_LIMIT,
            rate_limit_delay_ms: DEFAULT_RATE_LIMIT_DELAY_MS,
            page_size: MAX_SIGNATURES_PER_REQUEST,
        }
    }
}

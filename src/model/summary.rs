use serde::Serialize;

use super::analysis::TokenAnalysis;

/// Outcome of fetching transaction bodies for a signature list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchFetchReport {
    pub requested: usize,
    pub fetched: usize,
    pub failed: usize,
}

impl BatchFetchReport {
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub mint: String,
    pub total_buys: usize,
    pub total_sells: usize,
    pub profit_percent: f64,
}

impl TokenSummary {
    pub fn from_analysis(
        mint: &str,
        analysis: Option<&TokenAnalysis>,
    ) -> Self {
        match analysis {
            Some(analysis) => Self {
                mint: mint.to_string(),
                total_buys: analysis.total_buys,
                total_sells: analysis.total_sells,
                profit_percent: analysis.profit_percent,
            },
            None => Self {
                mint: mint.to_string(),
                total_buys: 0,
                total_sells: 0,
                profit_percent: 0.0,
            },
        }
    }
}

/// Run-level summary written next to the per-token ledgers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub wallet: String,
    pub timestamp: String,
    pub total_tokens: usize,
    pub exported_files: usize,
    pub fetch: BatchFetchReport,
    pub tokens: Vec<TokenSummary>,
}

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    // Dump fetched transactions as json for debugging
    pub raw_transactions: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            raw_transactions: false,
        }
    }
}

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    // Directory where logs will be stored
    pub directory: Option<String>,
    // Terminal level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: Some(".logs".to_string()),
            level: if cfg!(feature = "dev") { "debug" } else { "info" }.to_string(),
        }
    }
}

pub mod analyzer;
pub mod export;
pub mod log;
pub mod market;
pub mod monitor;
pub mod rpc;

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use solana_pubkey::Pubkey;
use tracing::debug;

pub use analyzer::AnalyzerConfig;
pub use export::ExportConfig;
pub use log::LoggingConfig;
pub use market::MarketDataConfig;
pub use monitor::MonitorConfig;
pub use rpc::RpcConfig;
pub use rpc::RpcProviderConfig;

use crate::Result;
use crate::err_with_loc;
use crate::error::ConfigError;

pub const ENV_SOLANA_RPC_URL: &str = "SOLANA_RPC_URL";
pub const ENV_BIRDEYE_API_KEY: &str = "BIRDEYE_API_KEY";
pub const ENV_TARGET_WALLET: &str = "TARGET_WALLET";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcConfig,
    pub analyzer: AnalyzerConfig,
    pub monitor: MonitorConfig,
    pub market_data: MarketDataConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| err_with_loc!(ConfigError::ParseError(e.to_string())))
    }

    /// Environment variables win over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(ENV_SOLANA_RPC_URL) {
            self.rpc.override_url(&url);
        }
        if let Some(api_key) = non_empty_env(ENV_BIRDEYE_API_KEY) {
            self.market_data.api_key = Some(api_key);
        }
        if let Some(wallet) = non_empty_env(ENV_TARGET_WALLET) {
            self.analyzer.target_wallet = Some(wallet);
        }
        if let Some(output_dir) = non_empty_env(ENV_OUTPUT_DIR) {
            self.export.output_dir = output_dir;
        }
    }

    /// Resolves the wallet to analyze, preferring an explicit override.
    pub fn target_wallet(
        &self,
        override_wallet: Option<&str>,
    ) -> Result<Pubkey> {
        let wallet = override_wallet
            .map(str::to_string)
            .or_else(|| self.analyzer.target_wallet.clone());

        match wallet {
            Some(wallet) => validate_wallet_address(&wallet),
            None => Err(err_with_loc!(ConfigError::MissingWalletAddress)),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn validate_wallet_address(address: &str) -> Result<Pubkey> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(err_with_loc!(ConfigError::MissingWalletAddress));
    }

    Pubkey::from_str(trimmed).map_err(|e| {
        err_with_loc!(ConfigError::InvalidWalletAddress {
            address: trimmed.to_string(),
            reason: e.to_string(),
        })
    })
}

/// Reads `.env`, then the TOML file (defaults when it does not exist), then env overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let _ = dotenvy::dotenv();
    let path = path.as_ref();

    let mut config = match std::fs::read_to_string(path) {
        Ok(config_str) => Config::from_toml_str(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("config_file_not_found::{}::using_defaults", path.display());
            Config::default()
        },
        Err(e) => {
            return Err(err_with_loc!(ConfigError::OpenFileError(format!("{}: {}", path.display(), e))));
        },
    };

    config.apply_env_overrides();
    Ok(config)
}

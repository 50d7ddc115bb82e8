use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    OpenFileError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Target wallet address is not configured")]
    MissingWalletAddress,

    #[error("Invalid wallet address {address}: {reason}")]
    InvalidWalletAddress { address: String, reason: String },

    #[error("Unexpected error: {0}")]
    Other(String),
}

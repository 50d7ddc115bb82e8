use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcClientError {
    #[error("[Rpc] No providers configured")]
    NoProviders,
    #[error("[Rpc] Invalid address {0}")]
    InvalidAddress(String),
    #[error("[Rpc] Invalid signature {0}")]
    InvalidSignature(String),
    #[error("[Rpc] Failed to fetch signatures for {address}: {reason}")]
    FetchSignaturesError { address: String, reason: String },
    #[error("[Rpc] Request failed: {0}")]
    RequestError(String),
}

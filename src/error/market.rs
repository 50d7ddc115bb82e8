use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("[MarketData] Rate limited by {0}")]
    RateLimited(String),
    #[error("[MarketData] Unauthorized, check the api key")]
    Unauthorized,
    #[error("[MarketData] Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("[MarketData] Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::Result;
use crate::config::MarketDataConfig;
use crate::err_with_loc;
use crate::error::MarketDataError;
use crate::model::PricePoint;
use crate::model::TokenMetadata;

/// Optional price/metadata lookups. Failures degrade to empty or placeholder values.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    async fn price_history(
        &self,
        token: &str,
        time_from: i64,
        time_to: i64,
    ) -> Vec<PricePoint>;

    async fn token_metadata(
        &self,
        token: &str,
    ) -> TokenMetadata;

    fn is_enabled(&self) -> bool;
}

/// Selected when no API key is configured.
#[derive(Debug, Default)]
pub struct DisabledMarketData;

#[async_trait]
impl MarketDataClient for DisabledMarketData {
    async fn price_history(
        &self,
        token: &str,
        _time_from: i64,
        _time_to: i64,
    ) -> Vec<PricePoint> {
        debug!("market_data_disabled::skipping_price_history::{}", token);
        Vec::new()
    }

    async fn token_metadata(
        &self,
        token: &str,
    ) -> TokenMetadata {
        TokenMetadata::unknown(token)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[derive(Debug, Deserialize)]
struct BirdeyeResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PriceHistoryData {
    #[serde(default)]
    items: Vec<PricePoint>,
}

pub struct BirdeyeClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl BirdeyeClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| err_with_loc!(MarketDataError::RequestError(e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<BirdeyeResponse<T>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .header("X-API-KEY", &self.api_key)
            .header("x-chain", "solana")
            .send()
            .await
            .map_err(|e| err_with_loc!(MarketDataError::RequestError(e)))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(err_with_loc!(MarketDataError::RateLimited(path.to_string()))),
            StatusCode::UNAUTHORIZED => Err(err_with_loc!(MarketDataError::Unauthorized)),
            status if !status.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response text>".to_string());
                Err(err_with_loc!(MarketDataError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                }))
            },
            _ => response
                .json::<BirdeyeResponse<T>>()
                .await
                .map_err(|e| err_with_loc!(MarketDataError::RequestError(e))),
        }
    }

    pub async fn try_price_history(
        &self,
        token: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<Vec<PricePoint>> {
        let response: BirdeyeResponse<PriceHistoryData> = self
            .get_json("/defi/history_price", &[
                ("address", token.to_string()),
                ("address_type", "token".to_string()),
                ("type", "1m".to_string()),
                ("time_from", time_from.to_string()),
                ("time_to", time_to.to_string()),
            ])
            .await?;

        Ok(response.data.map(|data| data.items).unwrap_or_default())
    }

    pub async fn try_token_metadata(
        &self,
        token: &str,
    ) -> Result<TokenMetadata> {
        let response: BirdeyeResponse<TokenMetadata> =
            self.get_json("/defi/token_overview", &[("address", token.to_string())]).await?;

        let mut metadata = response.data.unwrap_or_else(|| TokenMetadata::unknown(token));
        if metadata.address.is_empty() {
            metadata.address = token.to_string();
        }
        Ok(metadata)
    }
}

fn log_market_error(
    operation: &str,
    token: &str,
    e: &crate::error::Error,
) {
    match e.downcast_ref::<MarketDataError>() {
        Some(MarketDataError::RateLimited(_)) => {
            warn!("birdeye_rate_limited::{}::token::{}", operation, token);
        },
        Some(MarketDataError::Unauthorized) => {
            error!("birdeye_unauthorized::{}::check_api_key", operation);
        },
        _ => {
            error!("birdeye_request_failed::{}::token::{}::error::{}", operation, token, e);
        },
    }
}

#[async_trait]
impl MarketDataClient for BirdeyeClient {
    async fn price_history(
        &self,
        token: &str,
        time_from: i64,
        time_to: i64,
    ) -> Vec<PricePoint> {
        match self.try_price_history(token, time_from, time_to).await {
            Ok(points) => points,
            Err(e) => {
                log_market_error("price_history", token, &e);
                Vec::new()
            },
        }
    }

    async fn token_metadata(
        &self,
        token: &str,
    ) -> TokenMetadata {
        match self.try_token_metadata(token).await {
            Ok(metadata) => metadata,
            Err(e) => {
                log_market_error("token_metadata", token, &e);
                TokenMetadata::unknown(token)
            },
        }
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Picks Birdeye when a key is configured, the disabled stub otherwise.
pub fn make_market_data_client(config: &MarketDataConfig) -> Arc<dyn MarketDataClient> {
    let api_key = config.api_key.as_deref().filter(|_| config.has_api_key());

    match api_key {
        Some(api_key) => match BirdeyeClient::new(&config.base_url, api_key, Duration::from_millis(config.timeout_ms)) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                error!("failed_to_build_birdeye_client::error::{}::market_data_disabled", e);
                Arc::new(DisabledMarketData)
            },
        },
        None => {
            warn!("birdeye_api_key_not_set::market_data_disabled::only_chain_data_will_be_used");
            Arc::new(DisabledMarketData)
        },
    }
}

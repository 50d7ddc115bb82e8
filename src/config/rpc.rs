use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use tokio::sync::RwLock;
use tracing::debug;
use tracing::warn;

use crate::constants::DEFAULT_RPC_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcProviderConfig {
    pub name: String,
    pub url: String,
    pub api_key: Option<String>,
    pub rate_limit: usize, // requests per second
}

impl RpcProviderConfig {
    pub fn from_url(url: &str) -> Self {
        Self {
            name: "default".to_string(),
            url: url.to_string(),
            api_key: None,
            rate_limit: 10,
        }
    }

    pub fn get_http_url(&self) -> String {
        let base = if self.url.contains("://") {
            self.url.clone()
        } else {
            format!("https://{}", self.url)
        };

        match &self.api_key {
            // Helius takes the key as a query parameter
            Some(api_key) if self.name == "helius" => format!("{}/?api-key={}", base.trim_end_matches('/'), api_key),
            Some(api_key) => format!("{}/{}", base.trim_end_matches('/'), api_key),
            None => base,
        }
    }
}

// Rate limiter state for each provider
#[derive(Debug)]
pub struct RateLimiterState {
    last_reset: Instant,
    request_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub providers: Vec<RpcProviderConfig>,
    pub commitment: String,
    pub max_retries: usize,
    pub base_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    #[serde(skip)]
    pub next_provider_index: Arc<AtomicUsize>,
    #[serde(skip)]
    pub rate_limiters: Arc<RwLock<HashMap<String, RateLimiterState>>>,
}

impl Clone for RpcConfig {
    fn clone(&self) -> Self {
        Self {
            providers: self.providers.clone(),
            commitment: self.commitment.clone(),
            max_retries: self.max_retries,
            base_retry_delay_ms: self.base_retry_delay_ms,
            max_retry_delay_ms: self.max_retry_delay_ms,
            next_provider_index: self.next_provider_index.clone(),
            rate_limiters: self.rate_limiters.clone(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            providers: vec![RpcProviderConfig::from_url(DEFAULT_RPC_URL)],
            commitment: "confirmed".to_string(),
            max_retries: 3,
            base_retry_delay_ms: 500,
            max_retry_delay_ms: 30_000,
            next_provider_index: Arc::new(AtomicUsize::new(0)),
            rate_limiters: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl RpcConfig {
    pub fn commitment_config(&self) -> CommitmentConfig {
        match self.commitment.as_str() {
            "processed" => CommitmentConfig::processed(),
            "finalized" => CommitmentConfig::finalized(),
            _ => CommitmentConfig::confirmed(),
        }
    }

    /// URL of the first provider, used for display.
    pub fn primary_url(&self) -> Option<String> {
        self.providers.first().map(|p| p.get_http_url())
    }

    /// Replaces the provider list with a single endpoint.
    pub fn override_url(
        &mut self,
        url: &str,
    ) {
        self.providers = vec![RpcProviderConfig::from_url(url)];
    }

    /// Round-robins over providers, skipping any that used up this second's budget.
    pub async fn get_next_client(&self) -> Option<(RpcClient, String)> {
        if self.providers.is_empty() {
            warn!("no_rpc_providers_configured");
            return None;
        }

        let providers_count = self.providers.len();
        let mut attempts = 0;

        loop {
            let index = self.next_provider_index.fetch_add(1, Ordering::Relaxed) % providers_count;
            let provider = &self.providers[index];

            let can_use_provider = {
                let mut rate_limiters_guard = self.rate_limiters.write().await;
                let state = rate_limiters_guard
                    .entry(provider.name.clone())
                    .or_insert_with(|| RateLimiterState {
                        last_reset: Instant::now(),
                        request_count: 0,
                    });

                let now = Instant::now();
                if now.duration_since(state.last_reset) >= Duration::from_secs(1) {
                    state.last_reset = now;
                    state.request_count = 0;
                }

                if state.request_count < provider.rate_limit {
                    state.request_count += 1;
                    true
                } else {
                    false
                }
            };

            if can_use_provider {
                let client = RpcClient::new_with_commitment(provider.get_http_url(), self.commitment_config());
                return Some((client, provider.name.clone()));
            }

            attempts += 1;
            if attempts >= providers_count {
                debug!("all_providers_rate_limited::waiting_1_second");
                tokio::time::sleep(Duration::from_secs(1)).await;
                attempts = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_keeps_explicit_scheme() {
        let provider = RpcProviderConfig::from_url("http://localhost:8899");
        assert_eq!(provider.get_http_url(), "http://localhost:8899");
    }

    #[test]
    fn http_url_appends_helius_key_as_query() {
        let provider = RpcProviderConfig {
            name: "helius".to_string(),
            url: "mainnet.helius-rpc.com".to_string(),
            api_key: Some("abc".to_string()),
            rate_limit: 10,
        };
        assert_eq!(provider.get_http_url(), "https://mainnet.helius-rpc.com/?api-key=abc");
    }

    #[test]
    fn http_url_appends_other_keys_as_path() {
        let provider = RpcProviderConfig {
            name: "quicknode".to_string(),
            url: "example.solana-mainnet.quiknode.pro".to_string(),
            api_key: Some("abc".to_string()),
            rate_limit: 10,
        };
        assert_eq!(provider.get_http_url(), "https://example.solana-mainnet.quiknode.pro/abc");
    }

    #[tokio::test]
    async fn round_robin_cycles_providers() {
        let mut config = RpcConfig::default();
        config.providers = vec![
            RpcProviderConfig { name: "a".into(), url: "a.example".into(), api_key: None, rate_limit: 5 },
            RpcProviderConfig { name: "b".into(), url: "b.example".into(), api_key: None, rate_limit: 5 },
        ];

        let (_, first) = config.get_next_client().await.expect("provider");
        let (_, second) = config.get_next_client().await.expect("provider");
        let (_, third) = config.get_next_client().await.expect("provider");
        assert_eq!((first.as_str(), second.as_str(), third.as_str()), ("a", "b", "a"));
    }

    #[tokio::test]
    async fn no_providers_yields_none() {
        let mut config = RpcConfig::default();
        config.providers.clear();
        assert!(config.get_next_client().await.is_none());
    }
}

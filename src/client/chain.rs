use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction_status::EncodedConfirmedTransactionWithStatusMeta;
use solana_transaction_status::UiTransactionEncoding;
use solana_transaction_status::UiTransactionStatusMeta;
use solana_transaction_status::UiTransactionTokenBalance;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::Result;
use crate::config::RpcConfig;
use crate::err_with_loc;
use crate::error::RpcClientError;
use crate::model::BatchFetchReport;
use crate::model::RawTransaction;
use crate::model::SignatureInfo;
use crate::model::TokenBalance;
use crate::model::TokenBalanceSnapshots;
use crate::utils::calculate_backoff_with_jitter;
use crate::utils::is_retryable_error;

/// Read-only view of the chain used by the engines.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Up to `limit` signatures touching `address`, newest first.
    async fn list_signatures(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>>;

    /// `Ok(None)` when the node has no body for the signature.
    async fn fetch_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<RawTransaction>>;

    async fn get_version(&self) -> Result<String>;

    async fn get_slot(&self) -> Result<u64>;

    /// Balance in lamports.
    async fn get_balance(
        &self,
        address: &Pubkey,
    ) -> Result<u64>;
}

pub struct SolanaRpcClient {
    rpc_config: Arc<RpcConfig>,
    page_size: usize,
}

impl SolanaRpcClient {
    pub fn new(
        rpc_config: Arc<RpcConfig>,
        page_size: usize,
    ) -> Self {
        Self {
            rpc_config,
            page_size: page_size.max(1),
        }
    }

    async fn call_with_retries<T, F, Fut>(
        &self,
        operation: &str,
        call: F,
    ) -> Result<T>
    where
        F: Fn(RpcClient) -> Fut + Send + Sync,
        Fut: Future<Output = std::result::Result<T, ClientError>> + Send,
        T: Send,
    {
        let max_retries = self.rpc_config.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 0..max_retries {
            let Some((client, provider_name)) = self.rpc_config.get_next_client().await else {
                return Err(err_with_loc!(RpcClientError::NoProviders));
            };

            debug!("rpc_call::{}::provider::{}::attempt::{}", operation, provider_name, attempt + 1);

            match call(client).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    last_error = e.to_string();
                    error!("rpc_call_failed::{}::provider::{}::error::{}", operation, provider_name, last_error);

                    if attempt + 1 >= max_retries {
                        break;
                    }

                    if is_retryable_error(&last_error) {
                        let backoff_delay = calculate_backoff_with_jitter(
                            attempt,
                            self.rpc_config.base_retry_delay_ms,
                            self.rpc_config.max_retry_delay_ms,
                        );
                        debug!(
                            "retrying_after_backoff::{}::attempt::{}::delay_ms::{}",
                            operation,
                            attempt + 1,
                            backoff_delay.as_millis()
                        );
                        tokio::time::sleep(backoff_delay).await;
                    } else {
                        tokio::time::sleep(Duration::from_millis(self.rpc_config.base_retry_delay_ms)).await;
                    }
                },
            }
        }

        Err(err_with_loc!(RpcClientError::RequestError(format!("{}: {}", operation, last_error))))
    }
}

#[async_trait]
impl ChainClient for SolanaRpcClient {
    async fn list_signatures(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>> {
        let commitment = self.rpc_config.commitment_config();
        let address = *address;
        let mut collected: Vec<SignatureInfo> = Vec::new();
        let mut before: Option<Signature> = None;

        while collected.len() < limit {
            let page_limit = (limit - collected.len()).min(self.page_size);

            let page = self
                .call_with_retries("get_signatures_for_address", move |client| async move {
                    client
                        .get_signatures_for_address_with_config(&address, GetConfirmedSignaturesForAddress2Config {
                            before,
                            until: None,
                            limit: Some(page_limit),
                            commitment: Some(commitment),
                        })
                        .await
                })
                .await
                .map_err(|e| {
                    err_with_loc!(RpcClientError::FetchSignaturesError {
                        address: address.to_string(),
                        reason: e.to_string(),
                    })
                })?;

            let page_len = page.len();
            debug!("fetched_signatures::count::{}::address::{}", page_len, address);

            for status in page {
                collected.push(SignatureInfo {
                    signature: status.signature,
                    slot: status.slot,
                    block_time: status.block_time,
                    err: status.err.map(|e| format!("{:?}", e)),
                });
            }

            if page_len < page_limit {
                break;
            }

            let Some(last) = collected.last() else {
                break;
            };
            before = Some(
                Signature::from_str(&last.signature)
                    .map_err(|_| err_with_loc!(RpcClientError::InvalidSignature(last.signature.clone())))?,
            );
        }

        Ok(collected)
    }

    async fn fetch_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<RawTransaction>> {
        let parsed = Signature::from_str(signature)
            .map_err(|_| err_with_loc!(RpcClientError::InvalidSignature(signature.to_string())))?;
        let commitment = self.rpc_config.commitment_config();

        let encoded = self
            .call_with_retries("get_transaction", move |client| async move {
                match client
                    .get_transaction_with_config(&parsed, RpcTransactionConfig {
                        encoding: Some(UiTransactionEncoding::Json),
                        commitment: Some(commitment),
                        max_supported_transaction_version: Some(0),
                    })
                    .await
                {
                    Ok(tx) => Ok(Some(tx)),
                    Err(e) if is_transaction_unavailable(&e.to_string()) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await?;

        match encoded {
            Some(tx) => Ok(Some(raw_transaction_from_encoded(signature, tx))),
            None => {
                warn!("transaction_not_available::signature::{}::skipping", signature);
                Ok(None)
            },
        }
    }

    async fn get_version(&self) -> Result<String> {
        let version = self
            .call_with_retries("get_version", |client| async move { client.get_version().await })
            .await?;
        Ok(version.solana_core)
    }

    async fn get_slot(&self) -> Result<u64> {
        self.call_with_retries("get_slot", |client| async move { client.get_slot().await }).await
    }

    async fn get_balance(
        &self,
        address: &Pubkey,
    ) -> Result<u64> {
        let address = *address;
        self.call_with_retries("get_balance", move |client| async move { client.get_balance(&address).await })
            .await
    }
}

// Null bodies and pruned history only; other RPC errors propagate.
fn is_transaction_unavailable(error_msg: &str) -> bool {
    error_msg.contains("invalid type: null")
        || error_msg.contains("Transaction version (0) is not supported")
        || error_msg.contains("Transaction history is not available from this node")
}

pub fn raw_transaction_from_encoded(
    signature: &str,
    encoded: EncodedConfirmedTransactionWithStatusMeta,
) -> RawTransaction {
    let meta = encoded.transaction.meta;

    RawTransaction {
        signature: signature.to_string(),
        slot: encoded.slot,
        block_time: encoded.block_time,
        err: meta.as_ref().and_then(|m| m.err.as_ref()).map(|e| format!("{:?}", e)),
        token_balances: meta.as_ref().and_then(snapshots_from_meta),
    }
}

/// Both sides must be present, a one-sided meta carries no usable snapshot.
pub fn snapshots_from_meta(meta: &UiTransactionStatusMeta) -> Option<TokenBalanceSnapshots> {
    let pre: Option<Vec<UiTransactionTokenBalance>> = meta.pre_token_balances.clone().into();
    let post: Option<Vec<UiTransactionTokenBalance>> = meta.post_token_balances.clone().into();

    Some(TokenBalanceSnapshots {
        pre: pre?.iter().map(token_balance_from_ui).collect(),
        post: post?.iter().map(token_balance_from_ui).collect(),
    })
}

/// `uiAmount` first, then `uiAmountString`, else 0.
pub fn token_balance_from_ui(balance: &UiTransactionTokenBalance) -> TokenBalance {
    let amount = balance
        .ui_token_amount
        .ui_amount
        .or_else(|| balance.ui_token_amount.ui_amount_string.parse::<f64>().ok())
        .unwrap_or(0.0);
    let owner: Option<String> = balance.owner.clone().into();

    TokenBalance::new(balance.account_index, balance.mint.clone(), owner, amount)
}

/// Fetches bodies one by one, pausing `delay` between calls.
///
/// Listing context (slot, block time, err) overrides whatever the body carries. Missing or
/// failed fetches are counted, never fatal.
pub async fn fetch_transactions_batch<C: ChainClient + ?Sized>(
    client: &C,
    signatures: &[SignatureInfo],
    delay: Duration,
) -> (Vec<RawTransaction>, BatchFetchReport) {
    let mut report = BatchFetchReport {
        requested: signatures.len(),
        ..Default::default()
    };
    let mut transactions = Vec::with_capacity(signatures.len());

    for (position, info) in signatures.iter().enumerate() {
        match client.fetch_transaction(&info.signature).await {
            Ok(Some(mut transaction)) => {
                transaction.slot = info.slot;
                transaction.block_time = info.block_time.or(transaction.block_time);
                if info.err.is_some() {
                    transaction.err = info.err.clone();
                }
                transactions.push(transaction);
                report.fetched += 1;
            },
            Ok(None) => {
                report.failed += 1;
            },
            Err(e) => {
                warn!("failed_to_fetch_transaction::signature::{}::error::{}", info.signature, e);
                report.failed += 1;
            },
        }

        if position + 1 < signatures.len() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    debug!(
        "batch_fetch_complete::requested::{}::fetched::{}::failed::{}",
        report.requested, report.fetched, report.failed
    );

    (transactions, report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipeline::extract_transfers;

    const WALLET: &str = "DDDD2zvzaPMLuZiC2Vos2i6TLFjJJ3bi1pN7kXQc3R5R";
    const MINT: &str = "6TqkYbXN3H7bYZ4YmQGxdL8kLjDc5fPWJGhR9Fp3pump";

    fn ui_balance(json: serde_json::Value) -> UiTransactionTokenBalance {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn ui_amount_is_preferred() {
        let balance = ui_balance(serde_json::json!({
            "accountIndex": 3,
            "mint": MINT,
            "uiTokenAmount": {"uiAmount": 8.5, "decimals": 6, "amount": "8500000", "uiAmountString": "8.5"},
            "owner": WALLET,
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        }));

        assert_eq!(token_balance_from_ui(&balance), TokenBalance::new(3, MINT, Some(WALLET.to_string()), 8.5));
    }

    #[test]
    fn falls_back_to_amount_string() {
        let balance = ui_balance(serde_json::json!({
            "accountIndex": 0,
            "mint": MINT,
            "uiTokenAmount": {"uiAmount": null, "decimals": 6, "amount": "1250000", "uiAmountString": "1.25"},
            "owner": WALLET
        }));

        assert_eq!(token_balance_from_ui(&balance).amount, 1.25);
    }

    #[test]
    fn unusable_amount_is_zero_and_owner_is_optional() {
        let balance = ui_balance(serde_json::json!({
            "accountIndex": 1,
            "mint": MINT,
            "uiTokenAmount": {"uiAmount": null, "decimals": 6, "amount": "0", "uiAmountString": ""}
        }));

        let converted = token_balance_from_ui(&balance);
        assert_eq!(converted.amount, 0.0);
        assert_eq!(converted.owner, None);
    }

    #[test]
    fn unavailable_errors_are_recognized() {
        assert!(is_transaction_unavailable("invalid type: null, expected struct"));
        assert!(is_transaction_unavailable("Transaction version (0) is not supported"));
        assert!(is_transaction_unavailable(
            "RPC response error -32011: Transaction history is not available from this node"
        ));
        assert!(!is_transaction_unavailable("429 Too Many Requests"));
        assert!(!is_transaction_unavailable("RPC response error -32601: Method not found"));
        assert!(!is_transaction_unavailable("Account not found"));
    }

    fn status_meta(
        pre: Option<serde_json::Value>,
        post: Option<serde_json::Value>,
    ) -> UiTransactionStatusMeta {
        let mut json = serde_json::json!({
            "err": null,
            "status": {"Ok": null},
            "fee": 5000,
            "preBalances": [1_000_000],
            "postBalances": [995_000]
        });
        if let Some(pre) = pre {
            json["preTokenBalances"] = pre;
        }
        if let Some(post) = post {
            json["postTokenBalances"] = post;
        }
        serde_json::from_value(json).unwrap()
    }

    fn wallet_holding(amount: f64) -> serde_json::Value {
        serde_json::json!([{
            "accountIndex": 1,
            "mint": MINT,
            "uiTokenAmount": {"uiAmount": amount, "decimals": 6, "amount": "0", "uiAmountString": amount.to_string()},
            "owner": WALLET
        }])
    }

    fn transaction_with(meta: &UiTransactionStatusMeta) -> RawTransaction {
        RawTransaction {
            token_balances: snapshots_from_meta(meta),
            ..RawTransaction::new("sig1", 1, Some(100))
        }
    }

    #[test]
    fn post_only_meta_has_no_snapshot() {
        let meta = status_meta(None, Some(wallet_holding(500.0)));

        assert_eq!(snapshots_from_meta(&meta), None);
        assert!(extract_transfers(&transaction_with(&meta)).is_empty());
    }

    #[test]
    fn pre_only_meta_has_no_snapshot() {
        let meta = status_meta(Some(wallet_holding(500.0)), None);

        assert_eq!(snapshots_from_meta(&meta), None);
        assert!(extract_transfers(&transaction_with(&meta)).is_empty());
    }

    #[test]
    fn empty_pre_side_still_counts_as_present() {
        let meta = status_meta(Some(serde_json::json!([])), Some(wallet_holding(500.0)));

        let snapshots = snapshots_from_meta(&meta).unwrap();
        assert!(snapshots.pre.is_empty());
        assert_eq!(snapshots.post, vec![TokenBalance::new(1, MINT, Some(WALLET.to_string()), 500.0)]);
        assert_eq!(extract_transfers(&transaction_with(&meta)).len(), 1);
    }
}

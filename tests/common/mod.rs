#![allow(dead_code)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use mockall::mock;
use muhasib::Result;
use muhasib::client::ChainClient;
use muhasib::error::RpcClientError;
use muhasib::model::RawTransaction;
use muhasib::model::SignatureInfo;
use muhasib::model::TokenBalance;
use solana_pubkey::Pubkey;

pub const MINT_A: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const MINT_B: &str = "So11111111111111111111111111111111111111112";
pub const OTHER_OWNER: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

pub fn wallet() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

pub fn wallet_address() -> String {
    wallet().to_string()
}

/// One balance change for `owner` on `mint`, account index 0.
pub fn transfer_tx(
    signature: &str,
    block_time: Option<i64>,
    mint: &str,
    owner: &str,
    pre: f64,
    post: f64,
) -> RawTransaction {
    RawTransaction::new(signature, 1_000 + block_time.unwrap_or_default() as u64, block_time).with_balances(
        vec![TokenBalance::new(0, mint, Some(owner.to_string()), pre)],
        vec![TokenBalance::new(0, mint, Some(owner.to_string()), post)],
    )
}

pub fn signature_info(transaction: &RawTransaction) -> SignatureInfo {
    SignatureInfo::new(transaction.signature.clone(), transaction.slot, transaction.block_time)
}

/// Newest-first listing for plain signature names.
pub fn listing(signatures: &[&str]) -> Vec<SignatureInfo> {
    signatures
        .iter()
        .enumerate()
        .map(|(i, signature)| SignatureInfo::new(*signature, 500 - i as u64, Some(1_700_000_000 - i as i64)))
        .collect()
}

mock! {
    pub Chain {}

    #[async_trait]
    impl ChainClient for Chain {
        async fn list_signatures(&self, address: &Pubkey, limit: usize) -> Result<Vec<SignatureInfo>>;
        async fn fetch_transaction(&self, signature: &str) -> Result<Option<RawTransaction>>;
        async fn get_version(&self) -> Result<String>;
        async fn get_slot(&self) -> Result<u64>;
        async fn get_balance(&self, address: &Pubkey) -> Result<u64>;
    }
}

/// In-memory chain that replays queued listings and serves known transaction bodies.
///
/// Once the queue is down to one listing, that listing is repeated.
#[derive(Default)]
pub struct ScriptedChain {
    listings: Mutex<VecDeque<Vec<SignatureInfo>>>,
    transactions: HashMap<String, RawTransaction>,
    failing: Vec<String>,
    pub list_calls: Mutex<Vec<usize>>,
    pub fetch_calls: Mutex<Vec<String>>,
}

impl ScriptedChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(
        self,
        listing: Vec<SignatureInfo>,
    ) -> Self {
        self.listings.lock().unwrap().push_back(listing);
        self
    }

    pub fn with_transaction(
        mut self,
        transaction: RawTransaction,
    ) -> Self {
        self.transactions.insert(transaction.signature.clone(), transaction);
        self
    }

    pub fn with_failing(
        mut self,
        signature: &str,
    ) -> Self {
        self.failing.push(signature.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    async fn list_signatures(
        &self,
        _address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>> {
        self.list_calls.lock().unwrap().push(limit);

        let mut listings = self.listings.lock().unwrap();
        let listing = if listings.len() > 1 {
            listings.pop_front().unwrap_or_default()
        } else {
            listings.front().cloned().unwrap_or_default()
        };

        Ok(listing.into_iter().take(limit).collect())
    }

    async fn fetch_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<RawTransaction>> {
        self.fetch_calls.lock().unwrap().push(signature.to_string());

        if self.failing.iter().any(|failing| failing == signature) {
            return Err(RpcClientError::RequestError("429 Too Many Requests".to_string()).into());
        }
        Ok(self.transactions.get(signature).cloned())
    }

    async fn get_version(&self) -> Result<String> {
        Ok("2.1.16".to_string())
    }

    async fn get_slot(&self) -> Result<u64> {
        Ok(300_000_000)
    }

    async fn get_balance(
        &self,
        _address: &Pubkey,
    ) -> Result<u64> {
        Ok(1_500_000_000)
    }
}

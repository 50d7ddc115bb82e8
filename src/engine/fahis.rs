use std::path::PathBuf;
use std::sync::Arc;

use tracing::error;
use tracing::info;

use crate::Result;
use crate::client::ChainClient;
use crate::client::SolanaRpcClient;
use crate::config::Config;
use crate::config::load_config;
use crate::config::validate_wallet_address;
use crate::constants::LOG_SIGNATURE_PREFIX_LEN;
use crate::err_with_loc;
use crate::error::ConfigError;
use crate::error::EngineError;
use crate::tracing::setup_tracing;
use crate::utils::format_block_time;
use crate::utils::lamports_to_sol;
use crate::utils::short_prefix;

const RECENT_SIGNATURE_COUNT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct FahisOptions {
  pub config_path: PathBuf,
  pub wallet: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfCheckReport {
  pub node_version: String,
  pub slot: u64,
  pub wallet: String,
  pub balance_sol: f64,
  pub recent_signatures: usize,
  pub newest_signature: Option<String>,
  pub newest_time: Option<String>,
}

fn check_failed(
  step: &'static str,
  e: crate::error::Error,
) -> crate::error::Error {
  let reason = format!("{:#}", e);
  if reason.contains("429") {
    error!("fahis::{}::rate_limited::retry_later", step);
  }
  err_with_loc!(EngineError::CheckFailed { step, reason })
}

/// Connectivity, wallet and history checks, in that order. Stops at the first failure.
pub async fn run_checks<C: ChainClient + ?Sized>(
  client: &C,
  wallet: Option<&str>,
) -> Result<SelfCheckReport> {
  let node_version = client.get_version().await.map_err(|e| check_failed("rpc_version", e))?;
  let slot = client.get_slot().await.map_err(|e| check_failed("rpc_slot", e))?;
  info!("fahis::rpc_connected::version::{}::slot::{}", node_version, slot);

  let wallet = wallet.ok_or_else(|| check_failed("wallet", err_with_loc!(ConfigError::MissingWalletAddress)))?;
  let pubkey = validate_wallet_address(wallet).map_err(|e| check_failed("wallet", e))?;
  info!("fahis::wallet_valid::{}", pubkey);

  let lamports = client.get_balance(&pubkey).await.map_err(|e| check_failed("balance", e))?;
  let balance_sol = lamports_to_sol(lamports);
  info!("fahis::balance_sol::{}", balance_sol);

  let recent = client
    .list_signatures(&pubkey, RECENT_SIGNATURE_COUNT)
    .await
    .map_err(|e| check_failed("recent_signatures", e))?;
  let newest = recent.first();
  info!("fahis::recent_transactions::{}", recent.len());

  let newest_signature = newest.map(|info| short_prefix(&info.signature, LOG_SIGNATURE_PREFIX_LEN));
  let newest_time = newest.and_then(|info| info.block_time).map(format_block_time);
  if let (Some(signature), Some(time)) = (&newest_signature, &newest_time) {
    info!("fahis::newest_transaction::{}::time::{}", signature, time);
  }

  Ok(SelfCheckReport {
    node_version,
    slot,
    wallet: pubkey.to_string(),
    balance_sol,
    recent_signatures: recent.len(),
    newest_signature,
    newest_time,
  })
}

fn log_configuration(config: &Config) {
  info!("fahis::rpc::{}", config.rpc.primary_url().unwrap_or_default());
  info!("fahis::target_wallet::{}", config.analyzer.target_wallet.as_deref().unwrap_or("<not set>"));
  info!("fahis::output_dir::{}", config.export.output_dir);
  info!("fahis::birdeye_api_key::{}", if config.market_data.has_api_key() { "configured" } else { "not configured (optional)" });
}

pub struct Fahis;

impl Fahis {
  pub async fn run(options: FahisOptions) -> Result<()> {
    let config = load_config(&options.config_path)?;

    setup_tracing("fahis", &config.logging)?;
    info!("Starting Fahis (فاحص): The Examiner");
    log_configuration(&config);

    let chain = SolanaRpcClient::new(Arc::new(config.rpc.clone()), config.analyzer.page_size);
    let wallet = options.wallet.or_else(|| config.analyzer.target_wallet.clone());

    match run_checks(&chain, wallet.as_deref()).await {
      Ok(_) => {
        info!("fahis::all_checks_passed");
        Ok(())
      },
      Err(e) => {
        error!("fahis::check_failed::{:#}", e);
        error!("fahis::hint::verify SOLANA_RPC_URL, the provider api key, TARGET_WALLET and network access");
        Err(e)
      },
    }
  }
}

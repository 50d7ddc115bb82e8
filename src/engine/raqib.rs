use std::path::PathBuf;
use std::sync::Arc;

use solana_pubkey::Pubkey;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::Result;
use crate::client::ChainClient;
use crate::client::SolanaRpcClient;
use crate::config::MonitorConfig;
use crate::config::load_config;
use crate::constants::LOG_SIGNATURE_PREFIX_LEN;
use crate::handler::ShutdownSignal;
use crate::model::SignatureInfo;
use crate::model::TransferEvent;
use crate::pipeline::DetectorState;
use crate::pipeline::LiveUpdateDetector;
use crate::pipeline::extract_transfers;
use crate::tracing::setup_tracing;
use crate::utils::format_block_time;
use crate::utils::short_prefix;

#[derive(Debug, Clone, Default)]
pub struct RaqibOptions {
  pub config_path: PathBuf,
  pub wallet: Option<String>,
  pub interval_ms: Option<u64>,
}

/// A newly detected transaction and the wallet's transfers in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedTransaction {
  pub signature: String,
  pub slot: u64,
  pub block_time: Option<i64>,
  /// `false` when the body could not be fetched.
  pub fetched: bool,
  pub transfers: Vec<TransferEvent>,
}

pub struct Raqib {
  chain: Arc<dyn ChainClient>,
  wallet: Pubkey,
  monitor: MonitorConfig,
  detector: LiveUpdateDetector,
  shutdown: ShutdownSignal,
}

impl Raqib {
  pub fn new(
    chain: Arc<dyn ChainClient>,
    wallet: Pubkey,
    monitor: MonitorConfig,
    shutdown: ShutdownSignal,
  ) -> Self {
    Self { chain, wallet, monitor, detector: LiveUpdateDetector::default(), shutdown }
  }

  pub fn detector(&self) -> &LiveUpdateDetector {
    &self.detector
  }

  pub async fn run(options: RaqibOptions) -> Result<()> {
    let mut config = load_config(&options.config_path)?;
    if let Some(interval_ms) = options.interval_ms {
      config.monitor.poll_interval_ms = interval_ms;
    }

    setup_tracing("raqib", &config.logging)?;
    info!("Starting Raqib (رقيب): The Watchful Guardian");

    let wallet = config.target_wallet(options.wallet.as_deref())?;
    let chain: Arc<dyn ChainClient> =
      Arc::new(SolanaRpcClient::new(Arc::new(config.rpc.clone()), config.analyzer.page_size));

    let shutdown_signal = ShutdownSignal::new();
    shutdown_signal.listen_for_ctrl_c();

    let mut raqib = Raqib::new(chain, wallet, config.monitor.clone(), shutdown_signal);
    raqib.initialize().await?;
    raqib.watch().await;

    info!("raqib::shutdown");
    Ok(())
  }

  /// Records the newest signature so only later activity is reported.
  pub async fn initialize(&mut self) -> Result<()> {
    let newest = self.chain.list_signatures(&self.wallet, 1).await?;
    self.detector.initialize(&newest);

    match self.detector.last_signature() {
      Some(signature) => info!(
        "raqib::initialized::wallet::{}::last_signature::{}",
        self.wallet,
        short_prefix(signature, LOG_SIGNATURE_PREFIX_LEN)
      ),
      None => info!("raqib::initialized::wallet::{}::no_history", self.wallet),
    }
    Ok(())
  }

  /// Polls until the shutdown signal trips. Only the sleep between polls is interrupted.
  pub async fn watch(&mut self) {
    info!(
      "raqib::watching::wallet::{}::interval_ms::{}",
      self.wallet, self.monitor.poll_interval_ms
    );

    while !self.shutdown.is_shutdown() {
      if let Err(e) = self.poll_once().await {
        error!("raqib::poll_failed::error::{:#}", e);
      }

      if self.shutdown.is_shutdown() {
        break;
      }

      tokio::select! {
        _ = tokio::time::sleep(self.monitor.poll_interval()) => {},
        _ = self.shutdown.wait_for_shutdown() => {
          info!("raqib::stop_requested");
        }
      }
    }
  }

  /// One poll. Returns the new transactions, oldest first.
  pub async fn poll_once(&mut self) -> Result<Vec<ObservedTransaction>> {
    let window = self.chain.list_signatures(&self.wallet, self.monitor.signature_window).await?;

    let Some(batch) = self.detector.detect(&window) else {
      debug!("raqib::heartbeat::no_new_transactions");
      return Ok(Vec::new());
    };

    info!("raqib::new_transactions::{}", batch.len());
    if batch.gap_possible {
      warn!(
        "raqib::window_overrun::older_transactions_may_be_missed::window::{}",
        self.monitor.signature_window
      );
    }

    let mut observed = Vec::with_capacity(batch.len());
    for (position, info) in batch.signatures.iter().enumerate() {
      observed.push(self.process_transaction(info).await);

      if position + 1 < batch.len() && !self.monitor.transaction_delay().is_zero() {
        tokio::time::sleep(self.monitor.transaction_delay()).await;
      }
    }

    self.detector.complete(&batch);
    debug_assert_eq!(self.detector.state(), DetectorState::Idle);

    Ok(observed)
  }

  async fn process_transaction(
    &self,
    info: &SignatureInfo,
  ) -> ObservedTransaction {
    let signature = short_prefix(&info.signature, LOG_SIGNATURE_PREFIX_LEN);
    let time = info.block_time.map(format_block_time).unwrap_or_else(|| "unknown".to_string());
    info!("raqib::transaction::{}::slot::{}::time::{}", signature, info.slot, time);

    let transaction = match self.chain.fetch_transaction(&info.signature).await {
      Ok(Some(transaction)) => transaction,
      Ok(None) => {
        warn!("raqib::transaction_unavailable::{}", signature);
        return ObservedTransaction::unfetched(info);
      },
      Err(e) => {
        warn!("raqib::transaction_fetch_failed::{}::error::{:#}", signature, e);
        return ObservedTransaction::unfetched(info);
      },
    };

    let wallet = self.wallet.to_string();
    let transfers: Vec<TransferEvent> = extract_transfers(&transaction)
      .into_iter()
      .filter(|transfer| transfer.is_owned_by(&wallet))
      .collect();

    if transfers.is_empty() {
      info!("raqib::non_token_transaction::{}", signature);
    }
    for transfer in &transfers {
      info!(
        "raqib::transfer::{}::mint::{}::{}::amount::{}",
        signature, transfer.mint, transfer.direction, transfer.amount
      );
    }

    ObservedTransaction {
      signature: info.signature.clone(),
      slot: info.slot,
      block_time: info.block_time,
      fetched: true,
      transfers,
    }
  }
}

impl ObservedTransaction {
  fn unfetched(info: &SignatureInfo) -> Self {
    Self {
      signature: info.signature.clone(),
      slot: info.slot,
      block_time: info.block_time,
      fetched: false,
      transfers: Vec::new(),
    }
  }
}

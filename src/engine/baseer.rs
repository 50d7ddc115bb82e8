use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use solana_pubkey::Pubkey;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::Result;
use crate::client::ChainClient;
use crate::client::MarketDataClient;
use crate::client::SolanaRpcClient;
use crate::client::fetch_transactions_batch;
use crate::client::make_market_data_client;
use crate::config::Config;
use crate::config::load_config;
use crate::err_with_loc;
use crate::error::EngineError;
use crate::export::ReportExporter;
use crate::handler::ShutdownSignal;
use crate::model::BatchFetchReport;
use crate::model::RawTransaction;
use crate::model::RunSummary;
use crate::model::TokenAnalysis;
use crate::model::TokenSummary;
use crate::pipeline::analyze_token;
use crate::pipeline::group_by_token;
use crate::tracing::setup_tracing;
use crate::utils::now_iso;

#[derive(Debug, Clone, Default)]
pub struct BaseerOptions {
  pub config_path: PathBuf,
  pub wallet: Option<String>,
  pub limit: Option<usize>,
}

/// One token seen in the wallet's history. `analysis` is `None` when it was never bought.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOutcome {
  pub mint: String,
  pub records: usize,
  pub analysis: Option<TokenAnalysis>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletReport {
  pub wallet: String,
  pub signatures: usize,
  pub fetch: BatchFetchReport,
  pub transactions: Vec<RawTransaction>,
  pub tokens: Vec<TokenOutcome>,
}

impl WalletReport {
  pub fn empty(wallet: &str) -> Self {
    Self {
      wallet: wallet.to_string(),
      signatures: 0,
      fetch: BatchFetchReport::default(),
      transactions: Vec::new(),
      tokens: Vec::new(),
    }
  }

  pub fn analyses(&self) -> impl Iterator<Item = &TokenAnalysis> {
    self.tokens.iter().filter_map(|token| token.analysis.as_ref())
  }

  pub fn to_summary(
    &self,
    timestamp: String,
    exported_files: usize,
  ) -> RunSummary {
    RunSummary {
      wallet: self.wallet.clone(),
      timestamp,
      total_tokens: self.tokens.len(),
      exported_files,
      fetch: self.fetch,
      tokens: self
        .tokens
        .iter()
        .map(|token| TokenSummary::from_analysis(&token.mint, token.analysis.as_ref()))
        .collect(),
    }
  }
}

/// Lists, fetches, groups and analyzes the wallet's history.
///
/// Only the signature listing is fatal. Unfetchable transactions are counted in the fetch
/// report and a token whose records cannot be analyzed is kept without an analysis.
pub async fn analyze_wallet<C: ChainClient + ?Sized>(
  client: &C,
  wallet: &Pubkey,
  limit: usize,
  delay: Duration,
) -> Result<WalletReport> {
  let wallet_address = wallet.to_string();

  let signatures = client
    .list_signatures(wallet, limit)
    .await
    .map_err(|e| err_with_loc!(EngineError::SignatureListingError(e.to_string())))?;
  info!("baseer::signatures_found::{}", signatures.len());

  if signatures.is_empty() {
    return Ok(WalletReport::empty(&wallet_address));
  }

  let (transactions, fetch) = fetch_transactions_batch(client, &signatures, delay).await;
  if fetch.is_partial() {
    warn!("baseer::partial_fetch::fetched::{}::failed::{}", fetch.fetched, fetch.failed);
  }

  let groups = group_by_token(&transactions, &wallet_address);
  info!("baseer::tokens_found::{}::records::{}", groups.len(), groups.total_records());

  let mut tokens = Vec::with_capacity(groups.len());
  for (mint, records) in groups.iter() {
    let analysis = match analyze_token(mint, records) {
      Ok(analysis) => analysis,
      Err(e) => {
        error!("baseer::analyze_token_failed::{}::error::{:#}", mint, e);
        None
      },
    };

    match &analysis {
      Some(analysis) => debug!(
        "baseer::token_analyzed::{}::buys::{}::sells::{}",
        mint, analysis.total_buys, analysis.total_sells
      ),
      None => debug!("baseer::token_without_buys::{}", mint),
    }

    tokens.push(TokenOutcome {
      mint: mint.to_string(),
      records: records.len(),
      analysis,
    });
  }

  Ok(WalletReport {
    wallet: wallet_address,
    signatures: signatures.len(),
    fetch,
    transactions,
    tokens,
  })
}

/// Writes one ledger per analyzed token with rows, then the summary.
///
/// A ledger that fails to write is logged and left out of the exported count.
pub fn export_report(
  exporter: &ReportExporter,
  report: &WalletReport,
  include_raw_transactions: bool,
) -> Result<RunSummary> {
  let mut exported_files = 0;

  for analysis in report.analyses().filter(|analysis| analysis.has_rows()) {
    match exporter.export_token_data(&analysis.token_mint, analysis) {
      Ok(_) => exported_files += 1,
      Err(e) => error!("baseer::export_failed::{}::error::{:#}", analysis.token_mint, e),
    }
  }

  if include_raw_transactions {
    if let Err(e) = exporter.export_raw_transactions(&report.wallet, &report.transactions) {
      error!("baseer::raw_transactions_export_failed::error::{:#}", e);
    }
  }

  let summary = report.to_summary(now_iso(), exported_files);
  exporter.export_summary(&summary)?;

  Ok(summary)
}

pub struct Baseer {
  pub config: Config,
  pub chain: Arc<dyn ChainClient>,
  pub market: Arc<dyn MarketDataClient>,
  pub exporter: ReportExporter,
}

impl Baseer {
  pub fn new(
    config: Config,
    chain: Arc<dyn ChainClient>,
    market: Arc<dyn MarketDataClient>,
  ) -> Result<Self> {
    let exporter = ReportExporter::new(&config.export.output_dir)?;
    Ok(Self { config, chain, market, exporter })
  }

  pub async fn run(options: BaseerOptions) -> Result<()> {
    let config = load_config(&options.config_path)?;

    setup_tracing("baseer", &config.logging)?;
    info!("Starting Baseer (بصير): The Analyzer");

    let chain: Arc<dyn ChainClient> =
      Arc::new(SolanaRpcClient::new(Arc::new(config.rpc.clone()), config.analyzer.page_size));
    let market = make_market_data_client(&config.market_data);

    let wallet = config.target_wallet(options.wallet.as_deref())?;
    let limit = options.limit.unwrap_or(config.analyzer.signature_limit);

    let baseer = Baseer::new(config, chain, market)?;

    let shutdown_signal = ShutdownSignal::new();
    shutdown_signal.listen_for_ctrl_c();

    tokio::select! {
      result = baseer.analyze(&wallet, limit) => {
        result?;
      },
      _ = shutdown_signal.wait_for_shutdown() => {
        info!("termination_signal::analysis_aborted");
      }
    }

    info!("baseer::shutdown");
    Ok(())
  }

  pub async fn analyze(
    &self,
    wallet: &Pubkey,
    limit: usize,
  ) -> Result<RunSummary> {
    info!("baseer::wallet::{}", wallet);
    info!("baseer::output_dir::{}", self.exporter.output_dir().display());
    info!("baseer::rpc::{}", self.config.rpc.primary_url().unwrap_or_default());
    info!("baseer::market_data::{}", if self.market.is_enabled() { "enabled" } else { "disabled" });

    let delay = Duration::from_millis(self.config.analyzer.rate_limit_delay_ms);
    let report = analyze_wallet(self.chain.as_ref(), wallet, limit, delay).await?;

    if report.signatures == 0 {
      info!("baseer::no_transactions_found::{}", wallet);
    }

    if self.market.is_enabled() {
      for analysis in report.analyses() {
        let metadata = self.market.token_metadata(&analysis.token_mint).await;
        info!("baseer::token::{}::symbol::{}::name::{}", analysis.token_mint, metadata.symbol, metadata.name);
      }
    }

    let summary = export_report(&self.exporter, &report, self.config.export.raw_transactions)?;
    info!(
      "baseer::done::tokens::{}::exported::{}::fetched::{}/{}",
      summary.total_tokens, summary.exported_files, summary.fetch.fetched, summary.fetch.requested
    );

    Ok(summary)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
//  Baseer: Wallet Ledger Analyzer
//  Part of Muhasib, the wallet accounting toolkit.
//
//  Baseer (بصير): "The Insightful", which reads a wallet's full history and writes
//  one chronological ledger per token it ever traded.
//
//  Designed to be patient with public endpoints.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use clap::Parser;
use muhasib::Result;
use muhasib::engine::Baseer;
use muhasib::engine::baseer::BaseerOptions;

#[derive(Parser, Debug)]
#[command(name = "baseer")]
#[command(about = "Export per-token buy/sell ledgers for a wallet", long_about = None)]
struct Args {
  /// Path to the TOML config
  #[arg(short, long, default_value = "Config.toml")]
  config: PathBuf,

  /// Wallet to analyze, overrides TARGET_WALLET
  #[arg(short, long)]
  wallet: Option<String>,

  /// Maximum number of signatures to fetch
  #[arg(short, long)]
  limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  Baseer::run(BaseerOptions { config_path: args.config, wallet: args.wallet, limit: args.limit }).await?;
  Ok(())
}

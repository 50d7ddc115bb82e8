// ─────────────────────────────────────────────────────────────────────────────
//  Raqib: Wallet Activity Monitor
//  Part of Muhasib, the wallet accounting toolkit.
//
//  Raqib (رقيب): "The Watchful Guardian", which polls a wallet and reports every
//  new transaction and token movement as it lands.
//
//  Designed to keep watch without missing a signature.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use clap::Parser;
use muhasib::Result;
use muhasib::engine::Raqib;
use muhasib::engine::raqib::RaqibOptions;

#[derive(Parser, Debug)]
#[command(name = "raqib")]
#[command(about = "Watch a wallet for new token transfers", long_about = None)]
struct Args {
  /// Path to the TOML config
  #[arg(short, long, default_value = "Config.toml")]
  config: PathBuf,

  /// Wallet to watch, overrides TARGET_WALLET
  #[arg(short, long)]
  wallet: Option<String>,

  /// Poll interval in milliseconds
  #[arg(short, long)]
  interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  Raqib::run(RaqibOptions { config_path: args.config, wallet: args.wallet, interval_ms: args.interval_ms }).await?;
  Ok(())
}

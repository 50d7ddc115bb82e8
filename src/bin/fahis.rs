// ─────────────────────────────────────────────────────────────────────────────
//  Fahis: Configuration Self-Check
//  Part of Muhasib, the wallet accounting toolkit.
//
//  Fahis (فاحص): "The Examiner", which verifies the RPC endpoint, the target wallet
//  and its recent history before the other engines are trusted with a run.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use clap::Parser;
use muhasib::Result;
use muhasib::engine::Fahis;
use muhasib::engine::fahis::FahisOptions;

#[derive(Parser, Debug)]
#[command(name = "fahis")]
#[command(about = "Check RPC connectivity and the target wallet", long_about = None)]
struct Args {
  /// Path to the TOML config
  #[arg(short, long, default_value = "Config.toml")]
  config: PathBuf,

  /// Wallet to check, overrides TARGET_WALLET
  #[arg(short, long)]
  wallet: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  Fahis::run(FahisOptions { config_path: args.config, wallet: args.wallet }).await?;
  Ok(())
}

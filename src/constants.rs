/// ======================= Endpoints =======================
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Birdeye public API base URL - requires a paid key for most endpoints
pub const BIRDEYE_API_URL: &str = "https://public-api.birdeye.so";

/// ======================= Batch analyzer =======================
pub const DEFAULT_SIGNATURE_LIMIT: usize = 1000;

/// getSignaturesForAddress refuses limits above this
pub const MAX_SIGNATURES_PER_REQUEST: usize = 1000;

/// Public RPC asks for roughly one request per second
pub const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 1000;

/// ======================= Monitor =======================
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

pub const DEFAULT_MONITOR_SIGNATURE_WINDOW: usize = 10;

/// ======================= Ledger formatting =======================
pub const SIGNATURE_PREFIX_LEN: usize = 10;

/// Length of the signature prefix shown in monitor logs
pub const LOG_SIGNATURE_PREFIX_LEN: usize = 20;

pub const MINT_FILENAME_PREFIX_LEN: usize = 10;

pub const MINT_FILENAME_SUFFIX_LEN: usize = 8;

pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// ======================= Native tokens =======================
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

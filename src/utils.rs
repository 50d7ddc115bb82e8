use std::time::Duration;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use rand::Rng;

use crate::constants::LAMPORTS_PER_SOL;
use crate::constants::SIGNATURE_PREFIX_LEN;

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Calculate exponential backoff with jitter
/// Based on: https://www.helius.dev/docs/rpc/optimization-techniques
pub fn calculate_backoff_with_jitter(
    attempt: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
) -> Duration {
    let exponential_delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt as u32));
    let capped_delay = exponential_delay.min(max_delay_ms);

    // ±25% jitter
    let mut rng = rand::rng();
    let jitter_range = (capped_delay as f64 * 0.25) as u64;
    let jitter = rng.random_range(0..=jitter_range * 2);
    let final_delay = capped_delay.saturating_add(jitter).saturating_sub(jitter_range);

    Duration::from_millis(final_delay)
}

/// Check if an error message indicates a rate limit or timeout that should be retried
pub fn is_retryable_error(error_msg: &str) -> bool {
    error_msg.contains("429") // Rate limit
        || error_msg.contains("timed out")
        || error_msg.contains("timeout")
        || error_msg.contains("connection reset")
        || error_msg.contains("connection refused")
        || error_msg.contains("Too Many Requests")
}

/// First `SIGNATURE_PREFIX_LEN` characters followed by `...`.
pub fn truncate_signature(signature: &str) -> String {
    short_prefix(signature, SIGNATURE_PREFIX_LEN)
}

pub fn short_prefix(
    value: &str,
    len: usize,
) -> String {
    let prefix: String = value.chars().take(len).collect();
    format!("{}...", prefix)
}

/// Block time (seconds) as `2024-11-06T10:15:30.000Z`.
pub fn format_block_time(block_time: i64) -> String {
    DateTime::<Utc>::from_timestamp(block_time, 0)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| block_time.to_string())
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

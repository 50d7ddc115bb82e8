use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_MONITOR_SIGNATURE_WINDOW;
use crate::constants::DEFAULT_POLL_INTERVAL_MS;
use crate::constants::DEFAULT_RATE_LIMIT_DELAY_MS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    pub signature_window: usize,
    pub transaction_delay_ms: u64,
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn transaction_delay(&self) -> Duration {
        Duration::from_millis(self.transaction_delay_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            signature_window: DEFAULT_MONITOR_SIGNATURE_WINDOW,
            transaction_delay_ms: DEFAULT_RATE_LIMIT_DELAY_MS,
        }
    }
}

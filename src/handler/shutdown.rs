use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing::warn;

/// Cloneable stop flag shared by the engine loops and the ctrl-c listener.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves immediately when already shut down.
    pub async fn wait_for_shutdown(&self) {
        self.token.cancelled().await;
    }

    /// Trips the signal on ctrl-c.
    pub fn listen_for_ctrl_c(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    match result {
                        Ok(()) => info!("ctrl_c_received::shutting_down"),
                        Err(e) => warn!("failed_to_listen_for_ctrl_c::error::{}", e),
                    }
                    signal.shutdown();
                }
                _ = signal.wait_for_shutdown() => {}
            }
        });
    }
}

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod export;
pub mod market;
pub mod rpc;

pub use analyzer::AnalyzerError;
pub use anyhow::anyhow;
pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::Result;
pub use config::ConfigError;
pub use engine::EngineError;
pub use export::ExportError;
pub use market::MarketDataError;
pub use rpc::RpcClientError;

// For consistent error handling with location info
#[macro_export]
macro_rules! err_with_loc {
    ($err:expr) => {
        anyhow::anyhow!($err).context(format!("at {}:{}", file!(), line!()))
    };
}

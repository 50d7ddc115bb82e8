pub mod chain;
pub mod market;

pub use chain::ChainClient;
pub use chain::SolanaRpcClient;
pub use chain::fetch_transactions_batch;
pub use market::BirdeyeClient;
pub use market::DisabledMarketData;
pub use market::MarketDataClient;
pub use market::make_market_data_client;

pub mod analysis;
pub mod summary;
pub mod token;
pub mod transaction;
pub mod transfer;

pub use analysis::OutputRow;
pub use analysis::TokenAnalysis;
pub use summary::BatchFetchReport;
pub use summary::RunSummary;
pub use summary::TokenSummary;
pub use token::PricePoint;
pub use token::TokenMetadata;
pub use transaction::RawTransaction;
pub use transaction::SignatureInfo;
pub use transaction::TokenBalance;
pub use transaction::TokenBalanceSnapshots;
pub use transfer::TokenEventRecord;
pub use transfer::TransferDirection;
pub use transfer::TransferEvent;

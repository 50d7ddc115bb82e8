pub mod analyzer;
pub mod detector;
pub mod extractor;
pub mod grouper;

pub use analyzer::analyze_token;
pub use analyzer::profit_percent;
pub use detector::DetectorState;
pub use detector::LiveUpdateDetector;
pub use detector::NewTransactions;
pub use extractor::extract_transfers;
pub use grouper::TokenGroups;
pub use grouper::group_by_token;

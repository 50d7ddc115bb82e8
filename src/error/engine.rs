use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to setup tracing: {0}")]
    SetupTracingError(String),
    #[error("Failed to fetch signatures: {0}")]
    SignatureListingError(String),
    #[error("Self-check failed at step {step}: {reason}")]
    CheckFailed { step: &'static str, reason: String },
}

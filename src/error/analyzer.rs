use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("Record {signature} is missing required field `{field}`")]
    MissingField { field: &'static str, signature: String },
}

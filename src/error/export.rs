use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDirError { path: String, source: std::io::Error },
    #[error("Failed to write {path}: {source}")]
    WriteError { path: String, source: std::io::Error },
    #[error("Failed to write csv row: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Failed to serialize json: {0}")]
    SerializeError(#[from] serde_json::Error),
}

pub mod ledger;

use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

pub use ledger::ledger_file_name;
pub use ledger::write_ledger;

use crate::Result;
use crate::constants::SUMMARY_FILE_NAME;
use crate::err_with_loc;
use crate::error::ExportError;
use crate::model::RawTransaction;
use crate::model::RunSummary;
use crate::model::TokenAnalysis;

/// Writes per-token ledgers and run artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    /// Creates the output directory (recursively) if missing.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            err_with_loc!(ExportError::CreateDirError {
                path: output_dir.display().to_string(),
                source: e,
            })
        })?;

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export_token_data(
        &self,
        mint: &str,
        analysis: &TokenAnalysis,
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(ledger_file_name(mint, analysis.profit_percent));
        write_ledger(&path, &analysis.data_rows)?;

        info!("exported_ledger::{}::rows::{}", path.display(), analysis.data_rows.len());
        Ok(path)
    }

    pub fn export_summary(
        &self,
        summary: &RunSummary,
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(SUMMARY_FILE_NAME);
        self.write_json(&path, summary)?;

        info!("exported_summary::{}::tokens::{}", path.display(), summary.total_tokens);
        Ok(path)
    }

    pub fn export_raw_transactions(
        &self,
        wallet: &str,
        transactions: &[RawTransaction],
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}_raw_transactions.json", wallet));
        self.write_json(&path, &transactions)?;

        info!("exported_raw_transactions::{}::count::{}", path.display(), transactions.len());
        Ok(path)
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<()> {
        let content = serde_json::to_string_pretty(value).map_err(|e| err_with_loc!(ExportError::SerializeError(e)))?;

        std::fs::write(path, content).map_err(|e| {
            err_with_loc!(ExportError::WriteError {
                path: path.display().to_string(),
                source: e,
            })
        })
    }
}

use std::path::Path;

use csv::WriterBuilder;

use crate::Result;
use crate::constants::MINT_FILENAME_PREFIX_LEN;
use crate::constants::MINT_FILENAME_SUFFIX_LEN;
use crate::err_with_loc;
use crate::error::ExportError;
use crate::model::OutputRow;

/// `{first 10}...{last 8}({sign}{profit:.2}%).csv`
pub fn ledger_file_name(
    mint: &str,
    profit_percent: f64,
) -> String {
    let chars: Vec<char> = mint.chars().collect();
    let prefix: String = chars.iter().take(MINT_FILENAME_PREFIX_LEN).collect();
    let suffix: String = chars[chars.len().saturating_sub(MINT_FILENAME_SUFFIX_LEN)..].iter().collect();
    let sign = if profit_percent >= 0.0 { "+" } else { "" };

    format!("{}...{}({}{:.2}%).csv", prefix, suffix, sign, profit_percent)
}

/// Header row comes from the `OutputRow` field names.
pub fn write_ledger(
    path: &Path,
    rows: &[OutputRow],
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| err_with_loc!(ExportError::CsvError(e)))?;

    for row in rows {
        writer.serialize(row).map_err(|e| err_with_loc!(ExportError::CsvError(e)))?;
    }

    writer.flush().map_err(|e| {
        err_with_loc!(ExportError::WriteError {
            path: path.display().to_string(),
            source: e,
        })
    })?;

    Ok(())
}

// src/schema/validate.rs

use anyhow::Result;
use std::path::Path;
use tracing::{info, instrument, warn};

use super::read::read_table;
use super::types::{delimiter_label, Table};
use crate::{GeocodeError, REQUIRED_COLUMNS};

/// Trim, lowercase, and turn spaces into underscores: `" Code Postal"` → `code_postal`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Required columns absent from `headers`, in `REQUIRED_COLUMNS` order.
/// `headers` are expected to be normalized already.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|needed| !headers.iter().any(|h| h == *needed))
        .map(|c| c.to_string())
        .collect()
}

/// Read the input table, normalize its headers, and check the required
/// columns are there. Tries `delimiter`, then `,`, then tab.
///
/// The returned table carries the normalized headers.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn ensure_columns<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Table> {
    let mut table = read_table(path.as_ref(), &[delimiter, b',', b'\t'])?;
    table.headers = table.headers.iter().map(|h| normalize_header(h)).collect();

    let missing = missing_columns(&table.headers);
    if !missing.is_empty() {
        warn!(missing = ?missing, "required columns missing");
        warn!(present = ?table.headers, "columns present");
        warn!(expected = ?REQUIRED_COLUMNS, "rename the input columns to the expected names");
        return Err(GeocodeError::MissingColumns {
            missing,
            present: table.headers,
        }
        .into());
    }

    info!(
        rows = table.row_count,
        columns = ?table.headers,
        delimiter = %delimiter_label(table.delimiter),
        "input ready"
    );
    Ok(table)
}

// src/schema/read.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs, io::Cursor, path::Path};
use tracing::debug;

use super::types::{delimiter_label, Table};

const BOM: char = '\u{feff}';

/// Parse `bytes` with a single delimiter, counting records.
///
/// Short rows are accepted (missing trailing fields read as empty); a row
/// with more fields than the header is an error.
fn parse_with(bytes: &[u8], delimiter: u8) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(bytes));

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut row_count = 0;
    for record in rdr.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            anyhow::bail!(
                "line {} has {} fields, header has {}",
                line,
                record.len(),
                headers.len()
            );
        }
        row_count += 1;
    }

    Ok(Table {
        delimiter,
        headers,
        row_count,
    })
}

/// Read a delimited file, trying each candidate delimiter in turn.
///
/// A candidate is accepted when the whole file parses and the header splits
/// into more than one column. If no candidate splits the header, the first
/// clean single-column parse is returned; if every candidate errors, the
/// last error is returned.
pub fn read_table<P: AsRef<Path>>(path: P, candidates: &[u8]) -> Result<Table> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let mut tried: Vec<u8> = Vec::with_capacity(candidates.len());
    let mut single_column: Option<Table> = None;
    let mut last_err: Option<anyhow::Error> = None;

    for &delimiter in candidates {
        if tried.contains(&delimiter) {
            continue;
        }
        tried.push(delimiter);

        match parse_with(&bytes, delimiter) {
            Ok(table) if table.headers.len() > 1 => {
                debug!(path = %path.display(), delimiter = %delimiter_label(delimiter), "parsed");
                return Ok(table);
            }
            Ok(table) => {
                debug!(delimiter = %delimiter_label(delimiter), "single column, trying next");
                single_column.get_or_insert(table);
            }
            Err(e) => {
                debug!(delimiter = %delimiter_label(delimiter), error = %e, "parse failed, trying next");
                last_err = Some(e);
            }
        }
    }

    if let Some(table) = single_column {
        return Ok(table);
    }
    match last_err {
        Some(e) => Err(e.context(format!("parsing {}", path.display()))),
        None => anyhow::bail!("no delimiter candidates given for {}", path.display()),
    }
}

// src/report.rs

use anyhow::Result;
use std::path::Path;

use crate::{schema::read_table, RESULT_COLUMNS};

/// What came back from the API, as far as we check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub row_count: usize,
    /// Result columns present in the output, original spelling kept.
    pub found_columns: Vec<String>,
}

impl Report {
    pub fn print(&self) {
        println!("\n--- REPORT ---");
        println!("Total rows: {}", self.row_count);
        for col in &self.found_columns {
            println!("Column found: {}", col);
        }
    }
}

/// Parse the geocoded file (`;` then `,`) and pick out the result columns,
/// matched case-insensitively. Parse failures propagate.
pub fn quick_report<P: AsRef<Path>>(geocoded: P) -> Result<Report> {
    let table = read_table(geocoded, &[b';', b','])?;
    let found_columns = table
        .headers
        .into_iter()
        .filter(|col| RESULT_COLUMNS.contains(&col.to_lowercase().as_str()))
        .collect();

    Ok(Report {
        row_count: table.row_count,
        found_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_result_columns_case_insensitively() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("geocoded.csv");
        fs::write(&path, "result_lat;RESULT_LON;foo\n48.8;2.3;x\n45.7;4.8;y\n")?;

        let report = quick_report(&path)?;
        assert_eq!(report.row_count, 2);
        assert_eq!(report.found_columns, vec!["result_lat", "RESULT_LON"]);
        Ok(())
    }

    #[test]
    fn comma_output_is_read() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("geocoded.csv");
        fs::write(
            &path,
            "adresse,commune,code_postal,result_lat,result_lon,result_score\n1 rue A,Paris,75001,48.8,2.3,0.91\n",
        )?;

        let report = quick_report(&path)?;
        assert_eq!(report.row_count, 1);
        assert_eq!(
            report.found_columns,
            vec!["result_lat", "result_lon", "result_score"]
        );
        Ok(())
    }

    #[test]
    fn unparseable_output_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("geocoded.csv");
        fs::write(&path, "a;b,c\n1;2;3,4,5\n")?;
        assert!(quick_report(&path).is_err());
        Ok(())
    }

    #[test]
    fn no_result_columns() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("geocoded.csv");
        fs::write(&path, "adresse;commune\n1 rue A;Paris\n")?;
        let report = quick_report(&path)?;
        assert!(report.found_columns.is_empty());
        assert_eq!(report.row_count, 1);
        Ok(())
    }
}

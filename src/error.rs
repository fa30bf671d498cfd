use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Fatal conditions that end a run with a non-zero exit code.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("missing columns: {missing:?} (present: {present:?})")]
    MissingColumns {
        missing: Vec<String>,
        present: Vec<String>,
    },

    #[error("upload failed after {attempts} attempts: {last_error}")]
    UploadExhausted { attempts: u32, last_error: String },
}

/// Any response other than 200 from the geocoding endpoint.
#[derive(Error, Debug)]
#[error("HTTP {} - {}", .status.as_u16(), .body)]
pub struct HttpStatusError {
    pub status: StatusCode,
    /// Response body, truncated for diagnostics.
    pub body: String,
}

pub mod config;
pub mod error;
pub mod fetch;
pub mod report;
pub mod schema;

pub use error::{GeocodeError, HttpStatusError};

/// Columns the geocoding API needs, after header normalization.
pub const REQUIRED_COLUMNS: [&str; 3] = ["adresse", "commune", "code_postal"];

/// Columns the API appends to each geocoded row.
pub const RESULT_COLUMNS: [&str; 3] = ["result_lat", "result_lon", "result_score"];

pub mod read;
pub mod types;
pub mod validate;

pub use read::read_table;
pub use types::{delimiter_label, Table};
pub use validate::{ensure_columns, missing_columns, normalize_header};

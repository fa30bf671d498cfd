/// Shape of a parsed delimited file. Rows are counted, never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub delimiter: u8,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Printable form of a delimiter byte (`\t` rather than a literal tab).
pub fn delimiter_label(delimiter: u8) -> String {
    (delimiter as char).escape_default().to_string()
}

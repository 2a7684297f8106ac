//! Error types for CSV parsing

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors surfaced by the parser
#[derive(Debug, Error)]
pub enum CsvError {
    /// Source missing, unreadable, or not valid UTF-8
    #[error("Read failure: {0}")]
    ReadFailure(String),

    /// Destination could not be created or written
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// A record's field count differs from the first record's
    #[error("Irregular column count: record {record} has {found} fields, expected {expected}")]
    IrregularColumns {
        /// 0-based index of the offending record
        record: usize,
        /// Width established by the first record
        expected: usize,
        /// Width of the offending record
        found: usize,
    },

    /// Input ended inside a quoted span
    #[error("Unterminated quoted field: record starting at line {line} is never closed")]
    UnterminatedQuote {
        /// 1-based physical line where the open record began
        line: usize,
    },
}

/// Coarse classification of [`CsvError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ReadFailure,
    WriteFailure,
    IrregularColumns,
    UnterminatedQuote,
}

impl CsvError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CsvError::ReadFailure(_) => ErrorKind::ReadFailure,
            CsvError::WriteFailure(_) => ErrorKind::WriteFailure,
            CsvError::IrregularColumns { .. } => ErrorKind::IrregularColumns,
            CsvError::UnterminatedQuote { .. } => ErrorKind::UnterminatedQuote,
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(err: std::io::Error) -> Self {
        CsvError::ReadFailure(err.to_string())
    }
}

//! # csvtable
//!
//! Quote-aware CSV parsing into a rectangular table of string fields.
//!
//! Fields may contain the separator, line breaks and doubled-quote escapes
//! when wrapped in quotes. Every record of the resulting [`Table`] has the
//! same number of fields; anything else is an error.
//!
//! ## Quick Start
//!
//! ```
//! use csvtable::parse_str;
//!
//! let table = parse_str("productID,name,price\n1,water,100\n").unwrap();
//! assert_eq!(table.records(), [
//!     vec!["productID", "name", "price"],
//!     vec!["1", "water", "100"],
//! ]);
//!
//! let table = parse_str("\"a\"\"b\",c\n").unwrap();
//! assert_eq!(table.get(0, 0), Some("a\"b"));
//! ```
//!
//! ## Reading a file
//!
//! ```no_run
//! use csvtable::{parse, CsvError};
//!
//! match parse("products.csv") {
//!     Ok(table) => println!("{} records", table.len()),
//!     Err(CsvError::IrregularColumns { record, .. }) => eprintln!("bad record {}", record),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod csv;
pub mod csv_reader;
pub mod csv_writer;
pub mod error;
pub mod options;
pub mod table;

pub use csv::{CsvEncoder, Record, RecordScanner, ScannerState};
pub use csv_reader::{CsvReader, CsvRecordIterator};
pub use csv_writer::CsvWriter;
pub use error::{CsvError, ErrorKind, Result};
pub use options::{CsvOptions, UnterminatedQuote, LINE_TERMINATOR};
pub use table::{Table, TableBuilder};

use std::path::Path;

/// Parse a CSV file with default options
///
/// Fails with [`CsvError::ReadFailure`] if the file cannot be opened or read
/// and with [`CsvError::IrregularColumns`] if records differ in width.
/// An empty file yields an empty table.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Table> {
    parse_with(path, &CsvOptions::default())
}

/// Parse a CSV file with custom options
pub fn parse_with<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Table> {
    CsvReader::open(path)?
        .with_options(options.clone())
        .into_table()
}

/// Parse CSV text with default options
pub fn parse_str(text: &str) -> Result<Table> {
    parse_str_with(text, &CsvOptions::default())
}

/// Parse CSV text with custom options
pub fn parse_str_with(text: &str, options: &CsvOptions) -> Result<Table> {
    CsvReader::from_reader(text.as_bytes())
        .with_options(options.clone())
        .into_table()
}

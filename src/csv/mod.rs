//! CSV utilities for scanning and encoding

mod encoder;
mod scanner;

pub use encoder::CsvEncoder;
pub use scanner::{Record, RecordScanner, ScannerState};

//! Quote-aware record scanner
//!
//! Consumes one physical line at a time. A record whose quoted span crosses a
//! line break keeps its state between calls and is only emitted once the quote
//! parity is even again at the end of a line.

use crate::error::{CsvError, Result};
use crate::options::{CsvOptions, UnterminatedQuote};
use log::{debug, warn};

/// One logical row of fields
pub type Record = Vec<String>;

/// State carried across physical lines while a record is being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    quote_parity: usize,
    field_buffer: String,
    record_complete: bool,
    pending_fields: Vec<String>,
    // A quote that brought parity back to even. The next character decides
    // whether it closed the span or opened a doubled-quote escape.
    escape_pending: bool,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self {
            quote_parity: 0,
            field_buffer: String::with_capacity(64),
            record_complete: true,
            pending_fields: Vec::new(),
            escape_pending: false,
        }
    }
}

impl ScannerState {
    /// Number of quote characters seen in the current record
    pub fn quote_parity(&self) -> usize {
        self.quote_parity
    }

    /// Whether the scanner is currently inside a quoted span
    pub fn in_quotes(&self) -> bool {
        self.quote_parity % 2 == 1
    }

    /// Literal text buffered for the field being built
    pub fn field_buffer(&self) -> &str {
        &self.field_buffer
    }

    /// Whether the last scanned line ended its record
    pub fn is_record_complete(&self) -> bool {
        self.record_complete
    }

    /// Fields already completed within the current record
    pub fn pending_fields(&self) -> &[String] {
        &self.pending_fields
    }

    fn finish_field(&mut self) {
        self.escape_pending = false;
        let field = std::mem::take(&mut self.field_buffer);
        self.pending_fields.push(field);
    }

    fn take_record(&mut self) -> Record {
        self.quote_parity = 0;
        self.escape_pending = false;
        self.record_complete = true;
        std::mem::take(&mut self.pending_fields)
    }
}

/// Line-driven CSV record scanner
///
/// Owned by a single parse. Feed it lines with the terminator stripped and
/// collect the records it emits.
///
/// # Examples
///
/// ```
/// use csvtable::{CsvOptions, RecordScanner};
///
/// let mut scanner = RecordScanner::new(CsvOptions::default().line_terminator("\n"));
/// assert_eq!(scanner.scan_line(r#""a,b",c"#), Some(vec!["a,b".to_string(), "c".to_string()]));
///
/// assert_eq!(scanner.scan_line(r#""line1"#), None);
/// assert_eq!(
///     scanner.scan_line(r#"line2",c"#),
///     Some(vec!["line1\nline2".to_string(), "c".to_string()])
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RecordScanner {
    state: ScannerState,
    options: CsvOptions,
    line_number: usize,
    record_start_line: usize,
}

impl RecordScanner {
    /// Create a scanner for the given dialect
    pub fn new(options: CsvOptions) -> Self {
        Self {
            state: ScannerState::default(),
            options,
            line_number: 0,
            record_start_line: 0,
        }
    }

    /// Current carried state
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Options this scanner was built with
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Replace the options, keeping the carried state and line count
    pub fn set_options(&mut self, options: CsvOptions) {
        self.options = options;
    }

    /// Whether the last scanned line ended its record
    pub fn is_record_complete(&self) -> bool {
        self.state.record_complete
    }

    /// Number of physical lines scanned so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Scan one physical line, returning the record it completes, if any
    pub fn scan_line(&mut self, line: &str) -> Option<Record> {
        self.line_number += 1;
        if self.state.record_complete {
            self.record_start_line = self.line_number;
        }

        let quote = self.options.quote_char as char;
        let delimiter = self.options.delimiter as char;
        let state = &mut self.state;

        for ch in line.chars() {
            if ch == quote {
                state.quote_parity += 1;
            }

            if state.escape_pending {
                state.escape_pending = false;
                if ch == quote {
                    // Doubled quote: emit one literal, this one is consumed
                    state.field_buffer.push(quote);
                    continue;
                }
            }

            if ch == quote {
                if !state.in_quotes() {
                    state.escape_pending = true;
                }
            } else if ch == delimiter && !state.in_quotes() {
                state.finish_field();
            } else {
                state.field_buffer.push(ch);
            }
        }

        if state.in_quotes() {
            state.record_complete = false;
            state
                .field_buffer
                .push_str(&self.options.line_terminator);
            return None;
        }

        state.finish_field();
        let record = state.take_record();
        if self.line_number > self.record_start_line {
            debug!(
                "record spanning lines {}-{} completed with {} fields",
                self.record_start_line,
                self.line_number,
                record.len()
            );
        }
        Some(record)
    }

    /// Close the input, applying the unterminated-quote policy
    ///
    /// Returns `Ok(None)` when no record is open.
    pub fn finish(&mut self) -> Result<Option<Record>> {
        if self.state.record_complete {
            return Ok(None);
        }

        match self.options.unterminated_quote {
            UnterminatedQuote::Error => Err(CsvError::UnterminatedQuote {
                line: self.record_start_line,
            }),
            UnterminatedQuote::Flush => {
                let state = &mut self.state;
                // Drop the terminator restored after the final line
                let len = state
                    .field_buffer
                    .strip_suffix(self.options.line_terminator.as_str())
                    .map(str::len)
                    .unwrap_or(state.field_buffer.len());
                state.field_buffer.truncate(len);
                state.finish_field();
                let record = state.take_record();
                warn!(
                    "input ended inside a quoted field opened at line {}; keeping buffered text",
                    self.record_start_line
                );
                Ok(Some(record))
            }
        }
    }
}

impl Default for RecordScanner {
    fn default() -> Self {
        Self::new(CsvOptions::default())
    }
}

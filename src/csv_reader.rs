//! CSV reading: line source, record scanning and table building

use crate::csv::{Record, RecordScanner};
use crate::error::{CsvError, Result};
use crate::options::{CsvOptions, UnterminatedQuote};
use crate::table::{Table, TableBuilder};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Yields physical lines with the `\n` or `\r\n` terminator stripped
struct LineSource<R> {
    reader: R,
    buffer: String,
    lines_read: usize,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
            lines_read: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<&str>> {
        self.buffer.clear();

        let bytes_read = self.reader.read_line(&mut self.buffer).map_err(|e| {
            CsvError::ReadFailure(format!(
                "Failed to read line {}: {}",
                self.lines_read + 1,
                e
            ))
        })?;

        if bytes_read == 0 {
            return Ok(None); // EOF
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        self.lines_read += 1;
        Ok(Some(&self.buffer))
    }
}

/// CSV reader producing records that may span several physical lines
///
/// # Examples
///
/// ```no_run
/// use csvtable::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// for record in reader.records() {
///     let record = record.unwrap();
///     println!("{:?}", record);
/// }
/// ```
///
/// # Whole table
///
/// ```
/// use csvtable::CsvReader;
///
/// let table = CsvReader::from_reader("\"a,b\",c\nd,e\n".as_bytes())
///     .into_table()
///     .unwrap();
///
/// assert_eq!(table.get(0, 0), Some("a,b"));
/// assert_eq!(table.width(), 2);
/// ```
pub struct CsvReader<R> {
    lines: LineSource<R>,
    scanner: RecordScanner,
    record_count: usize,
    finished: bool,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file
    ///
    /// Fails with [`CsvError::ReadFailure`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref).map_err(|e| {
            CsvError::ReadFailure(format!(
                "Failed to open CSV file {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        debug!("opened CSV source {}", path_ref.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> CsvReader<R> {
    /// Read CSV from any buffered source
    pub fn from_reader(reader: R) -> Self {
        CsvReader {
            lines: LineSource::new(reader),
            scanner: RecordScanner::new(CsvOptions::default()),
            record_count: 0,
            finished: false,
        }
    }

    /// Replace all options at once (builder pattern)
    ///
    /// Records and line numbers already read are kept.
    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.scanner.set_options(options);
        self
    }

    /// Set custom delimiter (builder pattern)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvtable::CsvReader;
    ///
    /// let reader = CsvReader::open("data.csv")
    ///     .unwrap()
    ///     .delimiter(b';');
    /// ```
    pub fn delimiter(self, delim: u8) -> Self {
        let options = self.scanner.options().clone().delimiter(delim);
        self.with_options(options)
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(self, quote: u8) -> Self {
        let options = self.scanner.options().clone().quote_char(quote);
        self.with_options(options)
    }

    /// Set the sequence restored for line breaks inside quoted fields (builder pattern)
    pub fn line_terminator(self, terminator: impl Into<String>) -> Self {
        let options = self.scanner.options().clone().line_terminator(terminator);
        self.with_options(options)
    }

    /// Set the policy for input ending inside a quoted field (builder pattern)
    pub fn unterminated_quote(self, policy: UnterminatedQuote) -> Self {
        let options = self.scanner.options().clone().unterminated_quote(policy);
        self.with_options(options)
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` when the source is exhausted.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }

        while let Some(line) = self.lines.next_line()? {
            if let Some(record) = self.scanner.scan_line(line) {
                self.record_count += 1;
                return Ok(Some(record));
            }
        }

        self.finished = true;
        let tail = self.scanner.finish()?;
        if tail.is_some() {
            self.record_count += 1;
        }
        Ok(tail)
    }

    /// Get iterator over records
    pub fn records(&mut self) -> CsvRecordIterator<'_, R> {
        CsvRecordIterator { reader: self }
    }

    /// Read every remaining record and validate the table shape
    pub fn into_table(mut self) -> Result<Table> {
        let mut builder = TableBuilder::new();
        while let Some(record) = self.read_record()? {
            builder.push(record)?;
        }
        Ok(builder.finish())
    }

    /// Get the number of records read so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Get the number of physical lines read so far
    pub fn line_number(&self) -> usize {
        self.lines.lines_read
    }
}

/// Iterator over CSV records
pub struct CsvRecordIterator<'a, R> {
    reader: &'a mut CsvReader<R>,
}

impl<R: BufRead> Iterator for CsvRecordIterator<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn reader(text: &str) -> CsvReader<&[u8]> {
        CsvReader::from_reader(text.as_bytes()).line_terminator("\n")
    }

    #[test]
    fn test_read_records() -> Result<()> {
        let mut reader = reader("productID,name,price\n1,water,100\n");
        let mut rows = vec![];
        for record in reader.records() {
            rows.push(record?);
        }

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["productID", "name", "price"]);
        assert_eq!(rows[1], vec!["1", "water", "100"]);
        assert_eq!(reader.record_count(), 2);
        assert_eq!(reader.line_number(), 2);
        Ok(())
    }

    #[test]
    fn test_crlf_lines_stripped() -> Result<()> {
        let table = reader("a,b\r\nc,d\r\n").into_table()?;
        assert_eq!(table.records(), [vec!["a", "b"], vec!["c", "d"]]);
        Ok(())
    }

    #[test]
    fn test_no_trailing_newline() -> Result<()> {
        let table = reader("a,b\nc,d").into_table()?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, 1), Some("d"));
        Ok(())
    }

    #[test]
    fn test_multiline_record_counts() -> Result<()> {
        let mut reader = reader("\"line1\nline2\",c\nd,e\n");
        let first = reader.read_record()?;
        assert_eq!(first, Some(vec!["line1\nline2".to_string(), "c".to_string()]));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.record_count(), 1);
        assert_eq!(reader.read_record()?, Some(vec!["d".to_string(), "e".to_string()]));
        assert_eq!(reader.read_record()?, None);
        assert_eq!(reader.read_record()?, None);
        Ok(())
    }

    #[test]
    fn test_empty_source() -> Result<()> {
        let table = reader("").into_table()?;
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let table = reader("a;\"b;c\"\n1;2\n").delimiter(b';').into_table()?;
        assert_eq!(table.records(), [vec!["a", "b;c"], vec!["1", "2"]]);
        Ok(())
    }

    #[test]
    fn test_setter_after_reading_keeps_line_numbers() -> Result<()> {
        let mut reader = reader("a,b\nc,d\n\"e,f\n");
        assert_eq!(reader.read_record()?, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(reader.read_record()?, Some(vec!["c".to_string(), "d".to_string()]));

        let mut reader = reader.delimiter(b',');
        assert_eq!(reader.record_count(), 2);
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, CsvError::UnterminatedQuote { line: 3 }));
        Ok(())
    }

    #[test]
    fn test_unterminated_quote_error() {
        let err = reader("a,b\n\"c,d\n").into_table().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedQuote);
    }

    #[test]
    fn test_unterminated_quote_flush() -> Result<()> {
        let table = reader("a,b\nc,\"d\n")
            .unterminated_quote(UnterminatedQuote::Flush)
            .into_table()?;
        assert_eq!(table.records(), [vec!["a", "b"], vec!["c", "d"]]);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_read_failure() {
        let bytes: &[u8] = b"a,b\n\xff\xfe,c\n";
        let err = CsvReader::from_reader(bytes).into_table().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadFailure);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_open_missing_file() {
        let err = CsvReader::open("does/not/exist.csv").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ReadFailure);
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}

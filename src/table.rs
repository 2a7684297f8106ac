//! Rectangular table of string fields

use crate::csv::{CsvEncoder, Record};
use crate::error::{CsvError, Result};
use crate::options::CsvOptions;
use log::debug;
use std::ops::Index;

/// Ordered records that all share the same field count
///
/// # Examples
///
/// ```
/// use csvtable::Table;
///
/// let table = Table::build(vec![
///     vec!["id".to_string(), "name".to_string()],
///     vec!["1".to_string(), "water".to_string()],
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.width(), 2);
/// assert_eq!(table.get(1, 1), Some("water"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Record>", into = "Vec<Record>")
)]
pub struct Table {
    records: Vec<Record>,
    width: usize,
}

impl Table {
    /// Validate records and build a table
    ///
    /// Fails with [`CsvError::IrregularColumns`] on the first record whose
    /// width differs from the first record's.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut builder = TableBuilder::new();
        for record in records {
            builder.push(record)?;
        }
        Ok(builder.finish())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field count shared by every record (0 for an empty table)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get a record by index
    pub fn record(&self, index: usize) -> Option<&[String]> {
        self.records.get(index).map(|r| r.as_slice())
    }

    /// Get a single field
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.records.get(row)?.get(col).map(|s| s.as_str())
    }

    /// All records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Consume the table, returning its records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Serialize back to CSV text
    ///
    /// Every record is followed by the configured line terminator, and line
    /// breaks inside fields are written as that terminator too. A table parsed
    /// with `options` comes back equal; any other table comes back with its
    /// embedded `\n`/`\r\n` breaks replaced by the terminator.
    pub fn to_csv_string(&self, options: &CsvOptions) -> String {
        let encoder = CsvEncoder::new(options.delimiter, options.quote_char)
            .line_terminator(options.line_terminator.as_str());
        let mut out = String::new();
        for record in &self.records {
            encoder.encode_record(record.as_slice(), &mut out);
            out.push_str(&options.line_terminator);
        }
        out
    }
}

impl TryFrom<Vec<Record>> for Table {
    type Error = CsvError;

    fn try_from(records: Vec<Record>) -> Result<Self> {
        Table::build(records)
    }
}

impl From<Table> for Vec<Record> {
    fn from(table: Table) -> Self {
        table.records
    }
}

impl Index<usize> for Table {
    type Output = [String];

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Accumulates records and enforces a uniform field count
#[derive(Debug, Default)]
pub struct TableBuilder {
    records: Vec<Record>,
    expected_width: Option<usize>,
}

impl TableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    ///
    /// The first record fixes the expected width.
    pub fn push(&mut self, record: Record) -> Result<()> {
        let found = record.len();
        match self.expected_width {
            None => self.expected_width = Some(found),
            Some(expected) if expected != found => {
                return Err(CsvError::IrregularColumns {
                    record: self.records.len(),
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        self.records.push(record);
        Ok(())
    }

    /// Number of records accepted so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record has been accepted
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Produce the table
    pub fn finish(self) -> Table {
        let width = self.expected_width.unwrap_or(0);
        debug!("built table: {} records x {} fields", self.records.len(), width);
        Table {
            records: self.records,
            width,
        }
    }
}

//! CSV file writing

use crate::csv::CsvEncoder;
use crate::error::{CsvError, Result};
use crate::options::CsvOptions;
use crate::table::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV file writer
///
/// Line breaks inside fields are written as the configured line terminator,
/// so a table parsed with the writer's options reads back unchanged.
///
/// # Examples
///
/// ```no_run
/// use csvtable::CsvWriter;
///
/// let mut writer = CsvWriter::create("output.csv").unwrap();
/// writer.write_record(["Name", "Note"]).unwrap();
/// writer.write_record(["Alice", "likes \"quotes\", commas"]).unwrap();
/// writer.save().unwrap();
/// ```
pub struct CsvWriter {
    writer: BufWriter<File>,

    // State
    record_count: usize,
    buffer: String,

    options: CsvOptions,
}

impl CsvWriter {
    /// Create a new CSV file, truncating an existing one
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| {
            CsvError::WriteFailure(format!(
                "Failed to create CSV file {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        Ok(CsvWriter {
            writer: BufWriter::new(file),
            record_count: 0,
            buffer: String::with_capacity(4096),
            options: CsvOptions::default(),
        })
    }

    /// Replace all options at once (builder pattern)
    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.options.delimiter = delim;
        self
    }

    /// Set the line terminator written after each record (builder pattern)
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.options.line_terminator = terminator.into();
        self
    }

    /// Write one record followed by the line terminator
    pub fn write_record<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Reuse buffer
        self.buffer.clear();

        let encoder = CsvEncoder::new(self.options.delimiter, self.options.quote_char)
            .line_terminator(self.options.line_terminator.as_str());
        let fields: Vec<S> = fields.into_iter().collect();
        encoder.encode_record(&fields, &mut self.buffer);
        self.buffer.push_str(&self.options.line_terminator);

        self.writer
            .write_all(self.buffer.as_bytes())
            .map_err(|e| CsvError::WriteFailure(format!("Failed to write to file: {}", e)))?;

        self.record_count += 1;
        Ok(())
    }

    /// Write every record of a table
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for record in table {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Get the number of records written
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Flush and close the file
    pub fn save(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| CsvError::WriteFailure(format!("Failed to flush file: {}", e)))
    }
}

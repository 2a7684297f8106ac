//! Parser and writer configuration

/// Platform line terminator, restored inside quoted fields that span lines
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";
/// Platform line terminator, restored inside quoted fields that span lines
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

/// What to do when input ends inside a quoted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnterminatedQuote {
    /// Fail with [`CsvError::UnterminatedQuote`](crate::CsvError::UnterminatedQuote)
    #[default]
    Error,
    /// Keep the buffered text as the last field and emit the record
    Flush,
}

/// CSV dialect and end-of-input policy
///
/// # Examples
///
/// ```
/// use csvtable::CsvOptions;
///
/// let options = CsvOptions::default().delimiter(b';').line_terminator("\r\n");
/// assert_eq!(options.delimiter, b';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsvOptions {
    /// Field separator
    pub delimiter: u8,
    /// Quote character
    pub quote_char: u8,
    /// Sequence restored for line breaks inside quoted fields
    pub line_terminator: String,
    /// Policy for input ending inside a quoted span
    pub unterminated_quote: UnterminatedQuote,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_char: b'"',
            line_terminator: LINE_TERMINATOR.to_string(),
            unterminated_quote: UnterminatedQuote::default(),
        }
    }
}

impl CsvOptions {
    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.quote_char = quote;
        self
    }

    /// Set the line terminator (builder pattern)
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Set the end-of-input policy (builder pattern)
    pub fn unterminated_quote(mut self, policy: UnterminatedQuote) -> Self {
        self.unterminated_quote = policy;
        self
    }
}

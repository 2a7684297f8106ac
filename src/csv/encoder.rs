//! CSV encoding that the scanner reads back unchanged

use crate::options::LINE_TERMINATOR;

/// CSV encoder for re-serializing records
///
/// Line breaks inside fields (`\n` or `\r\n`) are written as the configured
/// line terminator, which is what the scanner restores when reading them back.
pub struct CsvEncoder {
    delimiter: char,
    quote_char: char,
    line_terminator: String,
}

impl CsvEncoder {
    /// Create a new CSV encoder with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter: delimiter as char,
            quote_char: quote_char as char,
            line_terminator: LINE_TERMINATOR.to_string(),
        }
    }

    /// Set the sequence written for line breaks inside fields (builder pattern)
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Encode a whole record into buffer, without a line terminator
    pub fn encode_record<S: AsRef<str>>(&self, fields: &[S], buffer: &mut String) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                buffer.push(self.delimiter);
            }
            self.encode_field(field.as_ref(), buffer);
        }
    }

    /// Encode single field with proper quoting/escaping
    fn encode_field(&self, field: &str, buffer: &mut String) {
        if !self.needs_quoting(field) {
            buffer.push_str(field);
            return;
        }

        buffer.push(self.quote_char);
        let mut chars = field.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == self.quote_char {
                // " -> ""
                buffer.push(self.quote_char);
                buffer.push(ch);
            } else if ch == '\n' || (ch == '\r' && chars.peek() == Some(&'\n')) {
                if ch == '\r' {
                    chars.next();
                }
                buffer.push_str(&self.line_terminator);
            } else {
                buffer.push(ch);
            }
        }
        buffer.push(self.quote_char);
    }

    /// Check if field requires quoting
    fn needs_quoting(&self, field: &str) -> bool {
        field
            .chars()
            .any(|c| c == self.delimiter || c == self.quote_char || c == '\n' || c == '\r')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(fields: &[&str]) -> String {
        let mut buffer = String::new();
        CsvEncoder::new(b',', b'"')
            .line_terminator("\r\n")
            .encode_record(fields, &mut buffer);
        buffer
    }

    #[test]
    fn test_simple_fields() {
        assert_eq!(encode(&["a", "b", "c"]), "a,b,c");
    }

    #[test]
    fn test_quoted_fields() {
        assert_eq!(encode(&["a,b", "c"]), r#""a,b",c"#);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(encode(&[r#"Say "Hello""#, "world"]), r#""Say ""Hello""",world"#);
    }

    #[test]
    fn test_newlines() {
        assert_eq!(encode(&["Line 1\r\nLine 2", "normal"]), "\"Line 1\r\nLine 2\",normal");
    }

    #[test]
    fn test_mixed_line_breaks_use_terminator() {
        assert_eq!(encode(&["a\nb\r\nc", "x"]), "\"a\r\nb\r\nc\",x");

        let mut buffer = String::new();
        CsvEncoder::new(b',', b'"')
            .line_terminator("\n")
            .encode_record(&["a\r\nb\nc"], &mut buffer);
        assert_eq!(buffer, "\"a\nb\nc\"");
    }

    #[test]
    fn test_lone_carriage_return_kept() {
        assert_eq!(encode(&["a\rb"]), "\"a\rb\"");
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(encode(&["", "", ""]), ",,");
    }

    #[test]
    fn test_custom_delimiter() {
        let mut buffer = String::new();
        CsvEncoder::new(b';', b'"').encode_record(&["a", "b;c", "d"], &mut buffer);
        assert_eq!(buffer, r#"a;"b;c";d"#);
    }
}

//! quotelen — Escape Accounting for Quoted String Literals
//!
//! This crate measures double-quoted literals (`"..."` with `\"`, `\\` and `\xHH`
//! escapes) as written versus as decoded, and backs the `quotelen` and `quoteview`
//! CLIs.

mod account;
mod literal;

#[cfg(feature = "pyo3")]
mod python;

pub use account::{accumulate, breakdown, measure, tally, tally_text, EscapeAccumulator, LineTally};
pub use literal::{decode, decoded_length, encode, encoded_length, raw_length};

/// Why a line is not a well-formed literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    TooShort,
    MissingOpeningQuote,
    MissingClosingQuote,
    UnescapedQuote,
    DanglingBackslash,
    UnknownEscape(char),
    BadHexEscape,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::TooShort => write!(f, "too short to be a quoted literal"),
            Reason::MissingOpeningQuote => write!(f, "missing opening '\"'"),
            Reason::MissingClosingQuote => write!(f, "missing closing '\"'"),
            Reason::UnescapedQuote => write!(f, "unescaped '\"' inside literal"),
            Reason::DanglingBackslash => write!(f, "dangling backslash"),
            Reason::UnknownEscape(c) => write!(f, "unknown escape '\\{c}'"),
            Reason::BadHexEscape => write!(f, "'\\x' must be followed by two hex digits"),
        }
    }
}

/// A line that does not parse as a quoted literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLiteral {
    pub reason: Reason,
    /// 0-based character column.
    pub column: usize,
}

impl MalformedLiteral {
    pub(crate) fn new(reason: Reason, column: usize) -> Self {
        Self { reason, column }
    }
}

impl std::fmt::Display for MalformedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at column {}", self.reason, self.column + 1)
    }
}

impl std::error::Error for MalformedLiteral {}

/// A malformed literal, located in its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountError {
    lineno: usize,
    line: String,
    source: MalformedLiteral,
}

impl AccountError {
    pub(crate) fn new(lineno: usize, line: &str, source: MalformedLiteral) -> Self {
        Self {
            lineno,
            line: line.to_string(),
            source,
        }
    }

    /// 1-based line number of the offending line.
    pub fn lineno(&self) -> usize {
        self.lineno
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn malformed(&self) -> &MalformedLiteral {
        &self.source
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed literal on line {}: {}: {}",
            self.lineno, self.source, self.line
        )
    }
}

impl std::error::Error for AccountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    const SAMPLE: &str = "\"\"\n\"abc\"\n\"aaa\\\"aaa\"\n\"\\x27\"\n";

    #[test]
    fn sample_totals() {
        let acc = tally_text(SAMPLE).unwrap();
        assert_eq!(acc.raw_total(), 23);
        assert_eq!(acc.decoded_total(), 11);
        assert_eq!(acc.difference(), 12);
        assert_eq!(acc.encoded_total(), 42);
        assert_eq!(acc.encoded_difference(), 19);
    }

    #[test]
    fn accumulate_is_repeatable() {
        let first = accumulate(SAMPLE.lines()).unwrap();
        let second = accumulate(SAMPLE.lines()).unwrap();
        assert_eq!(first, 12);
        assert_eq!(first, second);
    }

    #[test]
    fn error_message_names_line() {
        let err = tally_text("\"ok\"\n\"bad\\\"\n").unwrap_err();
        assert_eq!(err.lineno(), 2);
        assert_eq!(err.line(), "\"bad\\\"");
        assert_eq!(err.malformed().reason, Reason::DanglingBackslash);
        assert_eq!(
            err.to_string(),
            "malformed literal on line 2: dangling backslash at column 5: \"bad\\\""
        );
    }
}

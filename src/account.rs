use std::fmt;

use crate::literal::{decoded_length, encoded_length, raw_length};
use crate::AccountError;

/// Measurements for one literal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTally {
    /// 1-based line number in the input.
    pub lineno: usize,
    pub raw: usize,
    pub decoded: usize,
    pub encoded: usize,
}

impl LineTally {
    pub fn difference(&self) -> usize {
        self.raw - self.decoded
    }

    pub fn encoded_difference(&self) -> usize {
        self.encoded - self.raw
    }
}

/// Formats as `lineno|raw|decoded|encoded|`.
impl fmt::Display for LineTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}|", self.lineno, self.raw, self.decoded, self.encoded)
    }
}

/// Running totals over a sequence of literal lines.
///
/// Totals only grow; a rejected line leaves them as they were.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscapeAccumulator {
    raw_total: usize,
    decoded_total: usize,
    encoded_total: usize,
    literals: usize,
    lineno: usize,
}

impl EscapeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure the next input line and add it to the totals.
    ///
    /// Blank lines are counted for numbering but are not literals and yield `None`.
    pub fn push(&mut self, line: &str) -> Result<Option<LineTally>, AccountError> {
        self.lineno += 1;
        let Some(t) = measure(self.lineno, line)? else {
            return Ok(None);
        };
        self.raw_total += t.raw;
        self.decoded_total += t.decoded;
        self.encoded_total += t.encoded;
        self.literals += 1;
        Ok(Some(t))
    }

    pub fn raw_total(&self) -> usize {
        self.raw_total
    }

    pub fn decoded_total(&self) -> usize {
        self.decoded_total
    }

    pub fn encoded_total(&self) -> usize {
        self.encoded_total
    }

    /// Number of literal (non-blank) lines accumulated.
    pub fn literals(&self) -> usize {
        self.literals
    }

    /// `raw_total - decoded_total`.
    pub fn difference(&self) -> usize {
        self.raw_total - self.decoded_total
    }

    /// `encoded_total - raw_total`.
    pub fn encoded_difference(&self) -> usize {
        self.encoded_total - self.raw_total
    }
}

/// Measure a single line. A trailing `\r` is ignored; blank lines yield `None`.
pub fn measure(lineno: usize, line: &str) -> Result<Option<LineTally>, AccountError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }
    let decoded = decoded_length(line).map_err(|e| AccountError::new(lineno, line, e))?;
    Ok(Some(LineTally {
        lineno,
        raw: raw_length(line),
        decoded,
        encoded: encoded_length(line),
    }))
}

/// Fold `lines` into a fresh accumulator, stopping at the first malformed line.
pub fn tally<I, S>(lines: I) -> Result<EscapeAccumulator, AccountError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut acc = EscapeAccumulator::new();
    for line in lines {
        acc.push(line.as_ref())?;
    }
    Ok(acc)
}

/// Total raw length minus total decoded length over `lines`.
pub fn accumulate<I, S>(lines: I) -> Result<usize, AccountError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(tally(lines)?.difference())
}

pub fn tally_text(text: &str) -> Result<EscapeAccumulator, AccountError> {
    tally(text.lines())
}

/// Per-line measurements for every literal in `text`.
pub fn breakdown(text: &str) -> Result<Vec<LineTally>, AccountError> {
    let mut acc = EscapeAccumulator::new();
    let mut out = Vec::new();
    for line in text.lines() {
        if let Some(t) = acc.push(line)? {
            out.push(t);
        }
    }
    Ok(out)
}

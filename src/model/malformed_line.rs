//! Record of a gesture line that was dropped.
//!
//! The ingestor never hands these to its caller. It keeps the most recent one
//! so the status bar can show the start of what the device last sent that made
//! no sense.

use crate::model::ParseError;

/// A line that could not be turned into a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    line_number: usize,
    raw_line: String,
    error: ParseError,
}

impl MalformedLine {
    /// Create a new malformed line record.
    ///
    /// # Arguments
    ///
    /// * `line_number` - Position of the line in the stream (1-indexed)
    /// * `raw_line` - The trimmed line content that failed to parse
    /// * `error` - Why it was rejected
    pub fn new(line_number: usize, raw_line: impl Into<String>, error: ParseError) -> Self {
        Self {
            line_number,
            raw_line: raw_line.into(),
            error,
        }
    }

    /// Get the line number where the error occurred.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get the raw line content.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Get the rejection reason.
    pub fn error(&self) -> &ParseError {
        &self.error
    }
}

//! Line ingestion.
//!
//! Turns an arbitrary text stream into gesture registrations. The transport
//! hands over chunks of whatever size it happened to read; [`LineIngestor`]
//! reassembles lines, parses each one, and registers the valid ones with the
//! [`GestureStateStore`]. Bad lines are dropped and counted, never reported to
//! the caller.

use crate::model::MalformedLine;
use crate::parser::{self, ParseResult};
use crate::state::GestureStateStore;
use tracing::trace;

/// Most unfinished text kept while waiting for a newline.
///
/// A longer line cannot be a gesture message. It is dropped, and the rest of it
/// is skipped up to the next newline.
pub const MAX_PENDING_BYTES: usize = 4096;

/// Running totals for everything the ingestor has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Non-blank lines processed, including cut-off and overlong ones.
    pub lines: usize,
    /// Lines that produced a gesture.
    pub registered: usize,
    /// Lines that were dropped.
    pub dropped: usize,
}

/// Buffers partial lines and feeds parsed gestures into the store.
#[derive(Debug, Default)]
pub struct LineIngestor {
    buffer: String,
    /// Inside an overlong line; skip input until the next newline.
    skipping: bool,
    line_counter: usize,
    stats: IngestStats,
    last_malformed: Option<MalformedLine>,
}

impl LineIngestor {
    /// Create an ingestor with an empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of text.
    ///
    /// Every complete line in the buffer is parsed; the trailing segment after
    /// the last newline is kept for the next call. Returns how many gestures
    /// were registered by this chunk. Never fails and never blocks.
    ///
    /// Unfinished text is capped at [`MAX_PENDING_BYTES`]; past that the line is
    /// dropped and counted.
    pub fn feed(&mut self, chunk: &str, store: &mut GestureStateStore) -> usize {
        let chunk = if self.skipping {
            match chunk.find('\n') {
                Some(end) => {
                    self.skipping = false;
                    &chunk[end + 1..]
                }
                None => return 0,
            }
        } else {
            chunk
        };
        self.buffer.push_str(chunk);

        let mut registered = 0;
        if let Some(last_newline) = self.buffer.rfind('\n') {
            let complete: String = self.buffer.drain(..=last_newline).collect();
            for line in complete.split('\n') {
                if self.ingest_line(line, store) {
                    registered += 1;
                }
            }
        }

        if self.buffer.len() > MAX_PENDING_BYTES {
            trace!(bytes = self.buffer.len(), "Dropped overlong partial line");
            self.buffer.clear();
            self.skipping = true;
            self.stats.lines += 1;
            self.stats.dropped += 1;
        }
        registered
    }

    /// Forget any unfinished line.
    ///
    /// Called when the transport drops mid-line, so the fragment is not glued
    /// onto the first line of the next connection. A non-blank fragment counts
    /// as dropped.
    pub fn discard_pending(&mut self) {
        if !self.buffer.trim().is_empty() {
            trace!(fragment = %self.buffer, "Discarded unfinished line");
            self.stats.lines += 1;
            self.stats.dropped += 1;
        }
        self.buffer.clear();
        self.skipping = false;
    }

    /// Text received after the last newline, waiting for completion.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Totals since the ingestor was created.
    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// The most recent line that was dropped, if any.
    pub fn last_malformed(&self) -> Option<&MalformedLine> {
        self.last_malformed.as_ref()
    }

    /// Handle one complete line. Returns true if a gesture was registered.
    fn ingest_line(&mut self, line: &str, store: &mut GestureStateStore) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }

        self.line_counter += 1;
        self.stats.lines += 1;

        match parser::parse_line_graceful(line, self.line_counter) {
            ParseResult::Valid(message) => {
                store.register_state(&message.gesture, message.velocity);
                self.stats.registered += 1;
                true
            }
            ParseResult::Malformed(malformed) => {
                trace!(
                    line = malformed.line_number(),
                    error = %malformed.error(),
                    "Dropped gesture line"
                );
                self.stats.dropped += 1;
                self.last_malformed = Some(malformed);
                false
            }
        }
    }
}

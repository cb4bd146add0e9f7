//! Gesture input sources.
//!
//! This module provides the transports that deliver gesture text:
//! - A device path (serial port, FIFO, file) with reconnect
//! - Stdin for piped input
//! - Simulation mode, where only keyboard triggers produce gestures
//!
//! Every transport yields raw text chunks. Line splitting and parsing belong
//! to [`crate::ingest::LineIngestor`].

use crate::model::error::InputError;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

pub mod device;
pub mod stream;
pub mod utf8;

pub use device::{DeviceOptions, ReconnectPolicy, DEFAULT_BAUD_RATE};
pub use stream::{Incoming, LinkStatus, StreamSource};

/// Path argument that selects stdin explicitly.
pub const STDIN_PATH: &str = "-";

/// Unified input source for gesture text.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// Device or stdin stream read on a background thread.
    Stream(StreamSource),
    /// No transport; keyboard triggers only.
    Simulated,
}

impl InputSource {
    /// Poll for input received since the last call.
    ///
    /// Non-blocking - returns immediately with whatever arrived.
    pub fn poll(&mut self) -> Vec<Incoming> {
        match self {
            InputSource::Stream(s) => s.poll(),
            InputSource::Simulated => Vec::new(),
        }
    }

    /// Link status for the status bar.
    pub fn status(&self) -> LinkStatus {
        match self {
            InputSource::Stream(s) => s.status(),
            InputSource::Simulated => LinkStatus::Simulated,
        }
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. `-`: read stdin
/// 2. Any other path: open it as a device (must exist at startup)
/// 3. No path and stdin is piped: read stdin
/// 4. No path and stdin is a terminal: simulation mode
///
/// # Errors
///
/// Returns `InputError::DeviceNotFound` if the device path does not exist, or
/// `InputError::Io` if it cannot be inspected.
pub fn detect_input_source(
    input: Option<PathBuf>,
    options: DeviceOptions,
) -> Result<InputSource, InputError> {
    match input {
        Some(path) if path == Path::new(STDIN_PATH) => {
            Ok(InputSource::Stream(StreamSource::stdin()))
        }
        Some(path) => match fs::metadata(&path) {
            Ok(_) => Ok(InputSource::Stream(StreamSource::device(path, options))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(InputError::DeviceNotFound { path })
            }
            Err(e) => Err(InputError::Io(e)),
        },
        None if std::io::stdin().is_terminal() => Ok(InputSource::Simulated),
        None => Ok(InputSource::Stream(StreamSource::stdin())),
    }
}

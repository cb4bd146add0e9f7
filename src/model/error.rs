//! Error types for the stringfield viewer.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error returned by `main`
//!   - [`InputError`] - Device or stdin transport failures (device missing, IO)
//!   - [`crate::config::ConfigError`] - Config file read or parse failures
//!   - [`crate::logging::LoggingError`] - Log file setup failures
//!   - [`crate::view::TuiError`] - Terminal/TUI rendering failures
//! - [`ParseError`] - A single gesture line that could not be interpreted
//!
//! # Error Recovery Strategy
//!
//! Parse errors never leave the ingest path: a malformed line is dropped and counted, and
//! the visualization keeps running. A noisy or half-connected device must never halt the
//! display. Startup errors and terminal errors are fatal and propagate to `main`.
//! Transport failures after startup (unplugged cable) are reported as link status changes,
//! not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// All variants are fatal: `main` reports them and exits after the terminal
/// has been restored. Gesture parse failures never reach this type; the
/// ingestor drops them.
///
/// # Examples
///
/// ```no_run
/// use stringfield::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = open_device()?;
///     Ok(())
/// }
/// # fn open_device() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open the input transport.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Config file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] crate::view::TuiError),
}

/// Errors encountered when opening a gesture transport.
#[derive(Debug, Error)]
pub enum InputError {
    /// The device path given on the command line does not exist.
    ///
    /// Checked once at startup. Once the viewer is running, a vanished device is a
    /// disconnect, handled by the reconnect loop instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use stringfield::model::error::InputError;
    ///
    /// let err = InputError::DeviceNotFound {
    ///     path: PathBuf::from("/dev/ttyACM9")
    /// };
    /// assert!(err.to_string().contains("/dev/ttyACM9"));
    /// ```
    #[error("Device not found: {path}")]
    DeviceNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error while opening the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single gesture line was rejected.
///
/// These are diagnostic only. [`crate::ingest::LineIngestor`] drops rejected lines
/// without surfacing them to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not valid JSON, or a field has the wrong type.
    ///
    /// `message` carries the `serde_json` error text rather than the error itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use stringfield::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson { message: "expected value".to_string() };
    /// assert!(err.to_string().contains("expected value"));
    /// ```
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        /// Parser error text.
        message: String,
    },

    /// The message parsed but carries no usable `gesture` label.
    #[error("Missing gesture field")]
    MissingGesture,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_converts_to_app_error() {
        let input = InputError::DeviceNotFound {
            path: PathBuf::from("/dev/ttyUSB0"),
        };
        let app: AppError = input.into();
        assert!(matches!(app, AppError::InputRead(_)));
        assert!(app.to_string().contains("/dev/ttyUSB0"));
    }

    #[test]
    fn io_error_converts_to_input_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let input: InputError = io.into();
        assert!(matches!(input, InputError::Io(_)));
        assert!(input.to_string().contains("denied"));
    }

    #[test]
    fn config_error_converts_to_app_error() {
        let config = crate::config::ConfigError::InvalidPath("bad".to_string());
        let app: AppError = config.into();
        assert!(matches!(app, AppError::Config(_)));
        assert_eq!(app.to_string(), "Configuration error: Invalid config path: bad");
    }

    #[test]
    fn tui_error_converts_to_terminal_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let tui: crate::view::TuiError = io.into();
        let app: AppError = tui.into();
        assert!(matches!(app, AppError::Terminal(_)));
        assert!(app.to_string().contains("pipe"));
    }

    #[test]
    fn logging_error_converts_to_app_error() {
        let logging = crate::logging::LoggingError::SubscriberAlreadySet;
        let app: AppError = logging.into();
        assert!(matches!(app, AppError::Logging(_)));
    }
}

//! Configuration file loading with precedence handling.

use crate::source::{DeviceOptions, ReconnectPolicy, DEFAULT_BAUD_RATE};
use crate::state::gesture_store::DEFAULT_DECAY_FACTOR;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default render rate in frames per second.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Highest accepted frame rate.
pub const MAX_FRAME_RATE: u32 = 240;

/// Default wait between device reconnect attempts, in milliseconds.
pub const DEFAULT_RECONNECT_INTERVAL_MS: u64 = 1000;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "STRINGFIELD_CONFIG";

/// Environment variable overriding the decay factor.
pub const ENV_DECAY: &str = "STRINGFIELD_DECAY";

/// Environment variable overriding the frame rate.
pub const ENV_FPS: &str = "STRINGFIELD_FPS";

/// Environment variable overriding the serial baud rate.
pub const ENV_BAUD: &str = "STRINGFIELD_BAUD";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/stringfield/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Per-frame velocity multiplier.
    #[serde(default)]
    pub decay_factor: Option<f64>,

    /// Frames per second.
    #[serde(default)]
    pub frame_rate: Option<u32>,

    /// Reopen the device after a disconnect.
    #[serde(default)]
    pub reconnect: Option<bool>,

    /// Wait between reconnect attempts, in milliseconds.
    #[serde(default)]
    pub reconnect_interval_ms: Option<u64>,

    /// Serial line speed for tty devices.
    #[serde(default)]
    pub baud_rate: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Per-frame velocity multiplier, within `[0, 1]`.
    pub decay_factor: f64,
    /// Frames per second, within `1..=MAX_FRAME_RATE`.
    pub frame_rate: u32,
    /// Reopen the device after a disconnect.
    pub reconnect: bool,
    /// Wait between reconnect attempts, in milliseconds.
    pub reconnect_interval_ms: u64,
    /// Serial line speed for tty devices.
    pub baud_rate: u32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            decay_factor: DEFAULT_DECAY_FACTOR,
            frame_rate: DEFAULT_FRAME_RATE,
            reconnect: true,
            reconnect_interval_ms: DEFAULT_RECONNECT_INTERVAL_MS,
            baud_rate: DEFAULT_BAUD_RATE,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Duration of one frame.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frame_rate.max(1)))
    }

    /// Device reconnect behavior.
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            enabled: self.reconnect,
            interval: Duration::from_millis(self.reconnect_interval_ms),
        }
    }

    /// How to open the input device.
    pub fn device_options(&self) -> DeviceOptions {
        DeviceOptions {
            baud_rate: self.baud_rate,
            reconnect: self.reconnect_policy(),
        }
    }

    /// Clamp numeric settings into their usable ranges.
    ///
    /// A NaN decay factor and a zero baud rate fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        self.decay_factor = if self.decay_factor.is_nan() {
            DEFAULT_DECAY_FACTOR
        } else {
            self.decay_factor.clamp(0.0, 1.0)
        };
        self.frame_rate = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        if self.baud_rate == 0 {
            self.baud_rate = DEFAULT_BAUD_RATE;
        }
        self
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/stringfield/stringfield.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("stringfield").join("stringfield.log")
    } else {
        PathBuf::from("stringfield.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/stringfield/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stringfield").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `STRINGFIELD_CONFIG` environment variable
/// 3. Default path `~/.config/stringfield/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        decay_factor: config.decay_factor.unwrap_or(defaults.decay_factor),
        frame_rate: config.frame_rate.unwrap_or(defaults.frame_rate),
        reconnect: config.reconnect.unwrap_or(defaults.reconnect),
        reconnect_interval_ms: config
            .reconnect_interval_ms
            .unwrap_or(defaults.reconnect_interval_ms),
        baud_rate: config.baud_rate.unwrap_or(defaults.baud_rate),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `STRINGFIELD_DECAY`: Override decay factor
/// - `STRINGFIELD_FPS`: Override frame rate
/// - `STRINGFIELD_BAUD`: Override serial baud rate
///
/// Unparseable values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(decay) = std::env::var(ENV_DECAY)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
    {
        config.decay_factor = decay;
    }

    if let Some(fps) = std::env::var(ENV_FPS)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
    {
        config.frame_rate = fps;
    }

    if let Some(baud) = std::env::var(ENV_BAUD)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
    {
        config.baud_rate = baud;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    decay_override: Option<f64>,
    fps_override: Option<u32>,
    reconnect_override: Option<bool>,
    baud_override: Option<u32>,
) -> ResolvedConfig {
    if let Some(decay) = decay_override {
        config.decay_factor = decay;
    }

    if let Some(fps) = fps_override {
        config.frame_rate = fps;
    }

    if let Some(reconnect) = reconnect_override {
        config.reconnect = reconnect;
    }

    if let Some(baud) = baud_override {
        config.baud_rate = baud;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

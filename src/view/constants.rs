//! Layout and animation constants for TUI rendering.
//!
//! Centralized location for the numeric values that shape the display so
//! they can be tuned together.

/// Height of the gesture label line.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the velocity gauge (border + bar).
pub const GAUGE_HEIGHT: u16 = 3;

/// Height of the history strip (border + label + value).
pub const HISTORY_HEIGHT: u16 = 4;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// String displacement at zero velocity.
pub const MIN_AMPLITUDE: f64 = 2.0;

/// String displacement at full velocity.
pub const MAX_AMPLITUDE: f64 = 180.0;

/// Phase advance per rendered frame, in radians.
pub const PHASE_STEP_PER_FRAME: f64 = 0.08;

/// Full sine periods drawn across the string.
pub const WAVE_PERIODS: f64 = 3.0;

/// Points sampled along the string per frame.
pub const WAVE_SAMPLES: usize = 240;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;

/// Characters of the last dropped line shown in the status bar.
pub const DROPPED_EXCERPT_CHARS: usize = 12;

//! Gesture events and velocity normalization.
//!
//! A gesture arrives either from a device line (`{"gesture":"pluck","value":127}`)
//! or from a simulated key trigger. Both paths end up as a [`GestureEvent`]
//! with an upper-cased label and a velocity saturated into `[0, 1]`.

/// Upper bound of the raw device value range (MIDI-style 0-127).
pub const RAW_VALUE_MAX: f64 = 127.0;

/// Saturate a velocity into `[0, 1]`.
///
/// Out-of-range input is a normal case, not an error: negative values become
/// `0.0`, values above one become `1.0`. NaN carries no intensity and maps to
/// `0.0`.
pub fn clamp_velocity(velocity: f64) -> f64 {
    if velocity.is_nan() {
        return 0.0;
    }
    velocity.clamp(0.0, 1.0)
}

/// Convert a raw 0-127 device value to a normalized velocity.
///
/// Missing values count as zero.
pub fn normalize_raw_value(value: Option<f64>) -> f64 {
    clamp_velocity(value.unwrap_or(0.0) / RAW_VALUE_MAX)
}

/// Convert a normalized velocity back to the 0-127 display scale.
pub fn to_raw_value(velocity: f64) -> u8 {
    // clamp_velocity bounds the product to 0..=127
    (clamp_velocity(velocity) * RAW_VALUE_MAX).round() as u8
}

/// A single registered gesture.
///
/// Immutable once created. The constructor enforces the label and velocity
/// invariants so every event in the history is display-ready.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    gesture: String,
    velocity: f64,
}

impl GestureEvent {
    /// Create an event, upper-casing the label and clamping the velocity.
    pub fn new(gesture: impl AsRef<str>, velocity: f64) -> Self {
        Self {
            gesture: gesture.as_ref().to_uppercase(),
            velocity: clamp_velocity(velocity),
        }
    }

    /// Upper-cased gesture label.
    pub fn gesture(&self) -> &str {
        &self.gesture
    }

    /// Normalized velocity in `[0, 1]`.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Velocity on the 0-127 scale the device reports.
    pub fn raw_value(&self) -> u8 {
        to_raw_value(self.velocity)
    }
}

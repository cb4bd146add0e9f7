//! Simulated gesture triggers.
//!
//! Eight keyboard-fired gestures let a class rehearse the visuals without any
//! hardware attached. Each trigger samples a velocity from its own range and
//! goes straight to the state store, bypassing line ingestion.

use rand::Rng;

/// Velocity a trigger produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VelocityRange {
    /// Always the same velocity.
    Exact(f64),
    /// Sampled uniformly from `min..=max`.
    Uniform {
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },
}

impl VelocityRange {
    /// Draw one velocity from the range.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            VelocityRange::Exact(v) => v,
            VelocityRange::Uniform { min, max } => rng.random_range(min..=max),
        }
    }

    /// Whether `velocity` lies inside the range.
    pub fn contains(self, velocity: f64) -> bool {
        match self {
            VelocityRange::Exact(v) => velocity == v,
            VelocityRange::Uniform { min, max } => (min..=max).contains(&velocity),
        }
    }
}

/// One of the eight simulated gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Sharp attack, strong.
    Pluck,
    /// Rough sustained contact.
    Scrape,
    /// Bowed tone, wide dynamic range.
    Bow,
    /// Let go; always silent.
    Release,
    /// Light touch at a node.
    Harmonic,
    /// Damped, barely audible.
    Mute,
    /// Rapid repeated attack.
    Tremolo,
    /// Pitch wobble on a held note.
    Vibrato,
}

impl Trigger {
    /// All triggers in key-legend order.
    pub const ALL: [Trigger; 8] = [
        Trigger::Pluck,
        Trigger::Scrape,
        Trigger::Bow,
        Trigger::Release,
        Trigger::Harmonic,
        Trigger::Mute,
        Trigger::Tremolo,
        Trigger::Vibrato,
    ];

    /// Gesture name registered when the trigger fires.
    pub fn gesture_name(self) -> &'static str {
        match self {
            Trigger::Pluck => "pluck",
            Trigger::Scrape => "scrape",
            Trigger::Bow => "bow",
            Trigger::Release => "release",
            Trigger::Harmonic => "harmonic",
            Trigger::Mute => "mute",
            Trigger::Tremolo => "tremolo",
            Trigger::Vibrato => "vibrato",
        }
    }

    /// Velocity range the trigger samples from.
    pub fn velocity_range(self) -> VelocityRange {
        use VelocityRange::{Exact, Uniform};
        match self {
            Trigger::Pluck => Uniform { min: 0.6, max: 1.0 },
            Trigger::Scrape => Uniform { min: 0.3, max: 0.7 },
            Trigger::Bow => Uniform { min: 0.2, max: 0.9 },
            Trigger::Release => Exact(0.0),
            Trigger::Harmonic => Uniform { min: 0.3, max: 0.6 },
            Trigger::Mute => Uniform { min: 0.05, max: 0.2 },
            Trigger::Tremolo => Uniform { min: 0.4, max: 0.8 },
            Trigger::Vibrato => Uniform { min: 0.4, max: 0.9 },
        }
    }

    /// Default key for the trigger (first letter of the gesture name).
    pub fn key(self) -> char {
        match self {
            Trigger::Pluck => 'p',
            Trigger::Scrape => 's',
            Trigger::Bow => 'b',
            Trigger::Release => 'r',
            Trigger::Harmonic => 'h',
            Trigger::Mute => 'm',
            Trigger::Tremolo => 't',
            Trigger::Vibrato => 'v',
        }
    }

    /// Sample a velocity for one firing of this trigger.
    pub fn sample_velocity<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        self.velocity_range().sample(rng)
    }
}

//! Gesture state store.
//!
//! Owns the current gesture label, the current velocity, and a short history
//! of recent gestures. All mutation goes through [`GestureStateStore::register_state`]
//! and [`GestureStateStore::decay`]; the renderer only ever sees a
//! [`GestureSnapshot`].

use crate::model::{clamp_velocity, GestureEvent};
use std::collections::VecDeque;
use tracing::debug;

/// Maximum number of events kept in the history, newest first.
pub const HISTORY_CAPACITY: usize = 6;

/// Label shown before any gesture has been registered.
pub const IDLE_GESTURE: &str = "idle";

/// Per-tick decay factor used by the renderer unless configured otherwise.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.92;

/// Current gesture state shared by the ingest path and the render path.
///
/// # Invariants
///
/// - `0.0 <= velocity <= 1.0`
/// - `history.len() <= HISTORY_CAPACITY`, newest entry at the front
#[derive(Debug, Clone)]
pub struct GestureStateStore {
    gesture: String,
    velocity: f64,
    history: VecDeque<GestureEvent>,
}

/// Read-only view of the store for one rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct GestureSnapshot<'a> {
    /// Current gesture label (upper-cased once anything was registered).
    pub gesture: &'a str,
    /// Current velocity in `[0, 1]`.
    pub velocity: f64,
    /// Recent events, newest first.
    pub history: &'a VecDeque<GestureEvent>,
}

impl GestureStateStore {
    /// Create a store in its start-of-process state.
    pub fn new() -> Self {
        Self {
            gesture: IDLE_GESTURE.to_string(),
            velocity: 0.0,
            history: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Register a gesture.
    ///
    /// Velocity is saturated into `[0, 1]`. The label is upper-cased. The new
    /// event is prepended to the history and the oldest one is evicted once
    /// the history exceeds [`HISTORY_CAPACITY`].
    pub fn register_state(&mut self, gesture: &str, velocity: f64) {
        let event = GestureEvent::new(gesture, velocity);
        debug!(
            gesture = event.gesture(),
            velocity = event.velocity(),
            "Registered gesture"
        );

        self.gesture = event.gesture().to_string();
        self.velocity = event.velocity();
        self.history.push_front(event);
        self.history.truncate(HISTORY_CAPACITY);
    }

    /// Scale the current velocity by `factor`.
    ///
    /// Called once per frame. The result is clamped so a factor outside
    /// `[0, 1]` cannot push velocity out of range.
    pub fn decay(&mut self, factor: f64) {
        self.velocity = clamp_velocity(self.velocity * factor);
    }

    /// Borrow the current state for rendering.
    pub fn snapshot(&self) -> GestureSnapshot<'_> {
        GestureSnapshot {
            gesture: &self.gesture,
            velocity: self.velocity,
            history: &self.history,
        }
    }

    /// Current gesture label.
    pub fn gesture(&self) -> &str {
        &self.gesture
    }

    /// Current velocity in `[0, 1]`.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Recent events, newest first.
    pub fn history(&self) -> &VecDeque<GestureEvent> {
        &self.history
    }
}

impl Default for GestureStateStore {
    fn default() -> Self {
        Self::new()
    }
}

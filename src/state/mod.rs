//! Gesture state (pure).
//!
//! All state transitions are plain method calls testable without a terminal.

pub mod app_state;
pub mod gesture_store;

// Re-export for convenience
pub use app_state::{AppState, Flow};
pub use gesture_store::{
    GestureSnapshot, GestureStateStore, DEFAULT_DECAY_FACTOR, HISTORY_CAPACITY, IDLE_GESTURE,
};

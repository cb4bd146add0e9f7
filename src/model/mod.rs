//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod gesture;
pub mod key_action;
pub mod malformed_line;
pub mod trigger;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError};
pub use gesture::{
    clamp_velocity, normalize_raw_value, to_raw_value, GestureEvent, RAW_VALUE_MAX,
};
pub use key_action::KeyAction;
pub use malformed_line::MalformedLine;
pub use trigger::{Trigger, VelocityRange};

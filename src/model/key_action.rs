//! Domain-level keyboard actions independent of key bindings.

use crate::model::Trigger;

/// Actions the viewer can perform in response to a key.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Fire a simulated gesture. Default: the trigger's first letter, either case
    Fire(Trigger),
    /// Show or hide the trigger legend. Default: ?
    Help,
    /// Exit the viewer. Default: q/Esc/Ctrl+c
    Quit,
}

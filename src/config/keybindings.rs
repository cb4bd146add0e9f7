//! Keyboard bindings configuration.

use crate::model::{KeyAction, Trigger};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Each trigger answers to its letter in either case, so a class projector
/// with caps lock on still works.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers take part in the lookup; key kind and
    /// state flags are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Gesture triggers, lower and upper case
        for trigger in Trigger::ALL {
            let key = trigger.key();
            bindings.insert(
                KeyEvent::new(KeyCode::Char(key), KeyModifiers::NONE),
                KeyAction::Fire(trigger),
            );
            bindings.insert(
                KeyEvent::new(KeyCode::Char(key.to_ascii_uppercase()), KeyModifiers::SHIFT),
                KeyAction::Fire(trigger),
            );
            // Caps lock reports upper case without SHIFT
            bindings.insert(
                KeyEvent::new(KeyCode::Char(key.to_ascii_uppercase()), KeyModifiers::NONE),
                KeyAction::Fire(trigger),
            );
        }

        // Help
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE),
            KeyAction::Help,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT),
            KeyAction::Help,
        );

        // Quit
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}

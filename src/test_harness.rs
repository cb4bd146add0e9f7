//! Acceptance Test Harness for TUI testing
//!
//! Wraps TuiApp<TestBackend> with methods for pressing keys, pushing device
//! text and advancing frames, so acceptance tests read like a session at the
//! instrument.

use crate::source::stream::SourceEvent;
use crate::source::{InputSource, StreamSource};
use crate::state::AppState;
use crate::view::{ColorConfig, TuiApp, TuiError, ViewOptions};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;

/// Seed used for simulated trigger velocities.
const HARNESS_SEED: u64 = 0x5EED;

/// Convert a ratatui buffer to a string representation for assertions.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    /// Feeds the app's stream source; `None` in simulation mode.
    link: Option<Sender<SourceEvent>>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Keyboard-only app with the default terminal size (80x24).
    pub fn simulated() -> Result<Self, TuiError> {
        Self::build(InputSource::Simulated, None, 80, 24, 0.92)
    }

    /// App reading from a device link the test controls, with custom terminal
    /// size and decay factor.
    pub fn linked_with(width: u16, height: u16, decay_factor: f64) -> Result<Self, TuiError> {
        let (tx, rx) = mpsc::channel();
        let source = InputSource::Stream(StreamSource::from_receiver(rx));
        Self::build(source, Some(tx), width, height, decay_factor)
    }

    fn build(
        input_source: InputSource,
        link: Option<Sender<SourceEvent>>,
        width: u16,
        height: u16,
        decay_factor: f64,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let options = ViewOptions {
            decay_factor,
            tick_interval: Duration::from_millis(16),
            color: ColorConfig::with_colors(false),
        };
        let app = TuiApp::new_for_test(terminal, input_source, options, HARNESS_SEED);

        Ok(Self {
            app,
            link,
            running: true,
        })
    }

    /// Send a single key event
    ///
    /// Returns true if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Type characters as individual key presses.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break; // Quit encountered
            }
        }
    }

    /// Report the link as up, as the device reader does after opening.
    pub fn connect(&self) {
        self.send_event(SourceEvent::Connected);
    }

    /// Report the link as lost.
    pub fn disconnect(&self, reason: &str) {
        self.send_event(SourceEvent::Disconnected {
            reason: reason.to_string(),
        });
    }

    /// Queue device text. It is ingested on the next frame.
    pub fn push(&self, text: &str) {
        self.send_event(SourceEvent::Chunk(text.to_string()));
    }

    fn send_event(&self, event: SourceEvent) {
        let tx = self
            .link
            .as_ref()
            .expect("harness was built without a device link");
        tx.send(event).expect("app dropped its stream source");
    }

    /// Advance `frames` frames.
    pub fn tick(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.tick_test().expect("Tick should succeed in test harness");
        }
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");

        let buffer = self.app.terminal().backend().buffer();
        buffer_to_string(buffer)
    }
}

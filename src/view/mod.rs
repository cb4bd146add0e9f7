//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
pub mod layout;
pub mod styles;
pub mod wave;

pub use help::render_help_overlay;
pub use layout::{render_layout, FrameContext};
pub use styles::{ColorConfig, Palette};

use crate::config::KeyBindings;
use crate::source::InputSource;
use crate::state::{AppState, Flow};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Settings the viewer takes from the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    /// Per-frame velocity multiplier.
    pub decay_factor: f64,
    /// Time between frames.
    pub tick_interval: Duration,
    /// Whether to emit colors.
    pub color: ColorConfig,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    input_source: InputSource,
    key_bindings: KeyBindings,
    palette: Palette,
    rng: StdRng,
    tick_interval: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(input_source: InputSource, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state: AppState::new(options.decay_factor),
            input_source,
            key_bindings: KeyBindings::default(),
            palette: Palette::new(options.color),
            rng: StdRng::from_rng(&mut rand::rng()),
            tick_interval: options.tick_interval,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Key events are handled as they arrive;
    /// everything else happens on the fixed frame tick.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Initial render so the screen has content immediately
        self.draw()?;

        let mut next_tick = Instant::now() + self.tick_interval;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(()); // User quit
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            if now >= next_tick {
                self.tick()?;
                next_tick += self.tick_interval;
                // Fell behind (suspended terminal, slow draw): don't try to catch up
                if next_tick < now {
                    next_tick = now + self.tick_interval;
                }
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// One frame: ingest pending input, decay, render.
    fn tick(&mut self) -> Result<(), TuiError> {
        self.poll_input();
        self.app_state.tick();
        self.draw()
    }

    /// Drain the input source into the gesture store.
    fn poll_input(&mut self) {
        let incoming = self.input_source.poll();
        if incoming.is_empty() {
            return;
        }
        let registered = self.app_state.ingest(incoming);
        if registered > 0 {
            debug!("Registered {} gestures this frame", registered);
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.app_state.apply(action, &mut self.rng) == Flow::Quit
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let ctx = FrameContext {
            snapshot: self.app_state.store().snapshot(),
            frame_count: self.app_state.frame_count,
            link: self.input_source.status(),
            dropped: self.app_state.ingestor().stats().dropped,
            last_dropped: self
                .app_state
                .ingestor()
                .last_malformed()
                .map(|m| m.raw_line()),
            help_visible: self.app_state.help_visible,
        };
        let palette = &self.palette;

        self.terminal.draw(|frame| {
            layout::render_layout(frame, &ctx, palette);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization and seeds the trigger RNG so runs are
    /// reproducible.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        input_source: InputSource,
        options: ViewOptions,
        seed: u64,
    ) -> Self {
        Self {
            terminal,
            app_state: AppState::new(options.decay_factor),
            input_source,
            key_bindings: KeyBindings::default(),
            palette: Palette::new(options.color),
            rng: StdRng::seed_from_u64(seed),
            tick_interval: options.tick_interval,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Advance one frame (test-only accessor)
    pub(crate) fn tick_test(&mut self) -> Result<(), TuiError> {
        self.tick()
    }

    /// Render without advancing (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal for buffer inspection (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application with an input source
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(input_source: InputSource, options: ViewOptions) -> Result<(), TuiError> {
    install_panic_hook();
    info!(link = input_source.status().label(), "Starting viewer");

    // Run the app and ensure cleanup happens even on error
    let result = TuiApp::new(input_source, options).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();

        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "<unknown>".to_string());
        error!(%location, "panic");

        previous(info);
    }));
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

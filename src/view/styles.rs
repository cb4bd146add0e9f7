//! Colors for the gesture display.
//!
//! Everything the renderer colors comes from a [`Palette`], so `NO_COLOR`
//! handling lives in exactly one place.

use crate::source::LinkStatus;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors on or off without consulting the environment.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Base color of the newest history cell.
const HISTORY_RGB: (u8, u8, u8) = (30, 210, 200);

/// Brightness of the oldest history cell relative to the newest.
const HISTORY_MIN_BRIGHTNESS: f64 = 90.0 / 255.0;

/// Styles for every panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    enabled: bool,
    /// Gesture label line.
    pub gesture: Style,
    /// String oscillator line color.
    pub string: Color,
    /// Velocity gauge bar.
    pub gauge: Style,
    /// Panel borders.
    pub border: Style,
    /// Secondary text (hints, counters).
    pub muted: Style,
    /// Key names in hints and the help overlay.
    pub key: Style,
}

impl Palette {
    /// Build the palette for a color configuration.
    ///
    /// With colors disabled every style is the terminal default and
    /// emphasis comes from modifiers only.
    pub fn new(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                enabled: true,
                gesture: Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                string: Color::Rgb(240, 240, 240),
                gauge: Style::default().fg(Color::Rgb(255, 90, 90)),
                border: Style::default().fg(Color::DarkGray),
                muted: Style::default().fg(Color::Gray),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                enabled: false,
                gesture: Style::default().add_modifier(Modifier::BOLD),
                string: Color::Reset,
                gauge: Style::default(),
                border: Style::default(),
                muted: Style::default(),
                key: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }

    /// Whether this palette emits colors.
    pub fn colors_enabled(&self) -> bool {
        self.enabled
    }

    /// Style for the history cell at `index` (0 = newest) of `len` cells.
    ///
    /// Older cells fade toward the background.
    pub fn history_cell(&self, index: usize, len: usize) -> Style {
        let brightness = history_brightness(index, len);
        if !self.enabled {
            // Without colors, only the newest cell stands out
            return if index == 0 {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
        }

        let (r, g, b) = HISTORY_RGB;
        let scale = |c: u8| (f64::from(c) * brightness).round() as u8;
        Style::default()
            .bg(Color::Rgb(scale(r), scale(g), scale(b)))
            .fg(Color::Black)
    }

    /// Style for the link status indicator.
    pub fn link_status(&self, status: LinkStatus) -> Style {
        if !self.enabled {
            return match status {
                LinkStatus::Connected => Style::default().add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
        }
        let color = match status {
            LinkStatus::Connected => Color::Green,
            LinkStatus::Connecting => Color::Yellow,
            LinkStatus::Disconnected => Color::Red,
            LinkStatus::Ended | LinkStatus::Simulated => Color::Gray,
        };
        Style::default().fg(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}

/// Brightness in `[HISTORY_MIN_BRIGHTNESS, 1]` for a history cell.
///
/// Linear from 1 at the newest cell down toward the minimum at `len`.
pub(crate) fn history_brightness(index: usize, len: usize) -> f64 {
    if len == 0 {
        return 1.0;
    }
    let age = (index.min(len) as f64) / (len as f64);
    1.0 - age * (1.0 - HISTORY_MIN_BRIGHTNESS)
}

// ===== Tests =====

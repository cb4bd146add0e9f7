//! Screen layout.
//!
//! Pure layout logic: splits the frame into the gesture label, the string,
//! the velocity gauge, the history strip and the status bar, then renders
//! each from one [`FrameContext`].

use super::constants::{
    DROPPED_EXCERPT_CHARS, GAUGE_HEIGHT, HEADER_HEIGHT, HISTORY_HEIGHT, STATUS_BAR_HEIGHT,
};
use super::styles::Palette;
use super::{help, wave};
use crate::model::{to_raw_value, GestureEvent, Trigger};
use crate::source::LinkStatus;
use crate::state::{GestureSnapshot, HISTORY_CAPACITY};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Everything one frame needs to render.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Gesture state after this frame's decay.
    pub snapshot: GestureSnapshot<'a>,
    /// Frames rendered so far.
    pub frame_count: u64,
    /// Transport state.
    pub link: LinkStatus,
    /// Lines dropped by the ingestor so far.
    pub dropped: usize,
    /// Raw text of the most recent dropped line.
    pub last_dropped: Option<&'a str>,
    /// Whether the trigger legend overlay is shown.
    pub help_visible: bool,
}

/// Render the full screen.
pub fn render_layout(frame: &mut Frame, ctx: &FrameContext, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0), // String
            Constraint::Length(GAUGE_HEIGHT),
            Constraint::Length(HISTORY_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], ctx.snapshot.gesture, palette);
    wave::render_string(
        frame,
        chunks[1],
        ctx.snapshot.velocity,
        ctx.frame_count,
        palette,
    );
    render_gauge(frame, chunks[2], ctx.snapshot.velocity, palette);
    render_history(frame, chunks[3], ctx.snapshot.history, palette);
    render_status_bar(frame, chunks[4], ctx, palette);

    if ctx.help_visible {
        help::render_help_overlay(frame, palette);
    }
}

/// Text of the gesture label line, e.g. `gesture: PLUCK`.
pub fn gesture_label(gesture: &str) -> String {
    format!("gesture: {}", gesture.to_uppercase())
}

/// Text of the gauge label, e.g. `velocity → 127`.
pub fn velocity_label(velocity: f64) -> String {
    format!("velocity → {}", to_raw_value(velocity))
}

/// Start of a dropped line for the status bar, e.g. `{"gesture":"p…`.
pub fn dropped_excerpt(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(DROPPED_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

fn render_header(frame: &mut Frame, area: Rect, gesture: &str, palette: &Palette) {
    let header = Paragraph::new(Line::from(Span::styled(
        gesture_label(gesture),
        palette.gesture,
    )));
    frame.render_widget(header, area);
}

fn render_gauge(frame: &mut Frame, area: Rect, velocity: f64, palette: &Palette) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border),
        )
        .gauge_style(palette.gauge)
        .ratio(crate::model::clamp_velocity(velocity))
        .label(velocity_label(velocity));
    frame.render_widget(gauge, area);
}

fn render_history<'a, I>(frame: &mut Frame, area: Rect, history: I, palette: &Palette)
where
    I: IntoIterator<Item = &'a GestureEvent>,
{
    let block = Block::default()
        .title(" history ")
        .borders(Borders::ALL)
        .border_style(palette.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, HISTORY_CAPACITY as u32); HISTORY_CAPACITY])
        .split(inner);

    let events: Vec<&GestureEvent> = history.into_iter().take(HISTORY_CAPACITY).collect();
    let len = events.len();
    for (index, (event, cell)) in events.into_iter().zip(cells.iter()).enumerate() {
        let text = vec![
            Line::from(event.gesture().to_string()),
            Line::from(event.raw_value().to_string()),
        ];
        let paragraph = Paragraph::new(text)
            .style(palette.history_cell(index, len))
            .alignment(Alignment::Center);
        // One column of gap between cells
        let cell = Rect {
            width: cell.width.saturating_sub(1),
            ..*cell
        };
        frame.render_widget(paragraph, cell);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &FrameContext, palette: &Palette) {
    let keys: String = Trigger::ALL
        .iter()
        .map(|t| t.key().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let hints = Line::from(vec![
        Span::styled(keys, palette.key),
        Span::styled(" fire  ", palette.muted),
        Span::styled("?", palette.key),
        Span::styled(" help  ", palette.muted),
        Span::styled("q", palette.key),
        Span::styled(" quit", palette.muted),
    ]);

    let mut info = vec![
        Span::styled(format!("[{}]", ctx.link.label()), palette.link_status(ctx.link)),
        Span::styled(format!(" dropped: {}", ctx.dropped), palette.muted),
    ];
    if let Some(raw) = ctx.last_dropped {
        info.push(Span::styled("  last: ", palette.muted));
        info.push(Span::raw(dropped_excerpt(raw)));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(hints.width() as u16),
        ])
        .split(area);
    frame.render_widget(Paragraph::new(Line::from(info)), chunks[0]);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Right), chunks[1]);
}

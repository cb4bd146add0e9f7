//! Help overlay listing the gesture triggers.
//!
//! Shows a centered modal with one line per trigger and the application keys.
//! Toggled by '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Palette;
use crate::model::{Trigger, VelocityRange, RAW_VALUE_MAX};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Triggers ")
                .borders(Borders::ALL)
                .border_style(palette.key),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    // Dismissal hint on the bottom border
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press ? to close ",
        palette.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Raw 0-127 range a trigger fires with, e.g. `76-127` or `0`.
fn raw_range_text(range: VelocityRange) -> String {
    let raw = |v: f64| (v * RAW_VALUE_MAX).round() as u32;
    match range {
        VelocityRange::Exact(v) => format!("{}", raw(v)),
        VelocityRange::Uniform { min, max } => format!("{}-{}", raw(min), raw(max)),
    }
}

/// Build the overlay lines: one per trigger, then application keys.
fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Gestures",
        palette.gesture.add_modifier(Modifier::UNDERLINED),
    ))];

    for trigger in Trigger::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", trigger.key()), palette.key),
            Span::raw(format!("{:<10}", trigger.gesture_name().to_uppercase())),
            Span::styled(raw_range_text(trigger.velocity_range()), palette.muted),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Application",
        palette.gesture.add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(Line::from(vec![
        Span::styled("  ?  ", palette.key),
        Span::raw("Toggle this help"),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  q  ", palette.key),
        Span::raw("Quit (also Esc, Ctrl+c)"),
    ]));

    lines
}

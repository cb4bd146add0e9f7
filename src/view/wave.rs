//! String oscillator panel.
//!
//! The string is a sine wave whose amplitude follows the current velocity and
//! whose phase advances with the frame counter, so a plucked string visibly
//! rings down as the velocity decays.

use super::constants::{
    MAX_AMPLITUDE, MIN_AMPLITUDE, PHASE_STEP_PER_FRAME, WAVE_PERIODS, WAVE_SAMPLES,
};
use super::styles::Palette;
use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};
use std::f64::consts::TAU;

/// Peak displacement for a velocity in `[0, 1]`.
///
/// Maps linearly onto `MIN_AMPLITUDE..=MAX_AMPLITUDE`; the string never goes
/// completely flat so it stays visible while idle.
pub fn wave_amplitude(velocity: f64) -> f64 {
    let velocity = crate::model::clamp_velocity(velocity);
    MIN_AMPLITUDE + velocity * (MAX_AMPLITUDE - MIN_AMPLITUDE)
}

/// Sample the string shape for one frame.
///
/// Returns `samples` points with `x` spread evenly over `[0, 1]` and `y`
/// within `[-amplitude / 2, amplitude / 2]`.
pub fn wave_points(velocity: f64, frame: u64, samples: usize) -> Vec<(f64, f64)> {
    if samples == 0 {
        return Vec::new();
    }

    let half_amplitude = wave_amplitude(velocity) * 0.5;
    // Keep the phase small so precision does not degrade on long runs
    let phase = (frame as f64 * PHASE_STEP_PER_FRAME) % TAU;
    let last = (samples - 1).max(1) as f64;

    (0..samples)
        .map(|i| {
            let x = i as f64 / last;
            let t = x * TAU;
            (x, (t * WAVE_PERIODS + phase).sin() * half_amplitude)
        })
        .collect()
}

/// Render the oscillating string into `area`.
pub fn render_string(
    frame: &mut Frame,
    area: Rect,
    velocity: f64,
    frame_count: u64,
    palette: &Palette,
) {
    let points = wave_points(velocity, frame_count, WAVE_SAMPLES);
    let bound = MAX_AMPLITUDE * 0.5;
    let color = palette.string;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([-bound, bound])
        .paint(move |ctx| {
            for pair in points.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                });
            }
        });

    frame.render_widget(canvas, area);
}

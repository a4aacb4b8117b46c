//! Terminal UI helpers
//!
//! Dependency-free helpers for rendering captured frames and intensity
//! levels as plain strings. Frontends (the demo binary, tests, external
//! TUIs) decide where the strings go.

use crate::glyphs::{COLS, ROWS};
use crate::surface::CapturedFrame;

/// Brightness ramp from dark to fully lit.
pub const INTENSITY_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Map an intensity in `[0, 1]` onto the brightness ramp.
pub fn intensity_char(intensity: f32) -> char {
    let clamped = intensity.clamp(0.0, 1.0);
    let idx = (clamped * (INTENSITY_RAMP.len() - 1) as f32).round() as usize;
    INTENSITY_RAMP[idx.min(INTENSITY_RAMP.len() - 1)]
}

/// Render a horizontal intensity bar, e.g. `[######----]`.
pub fn create_intensity_bar(intensity: f32, width: usize) -> String {
    let clamped = intensity.clamp(0.0, 1.0);
    let filled = (clamped * width as f32).round() as usize;
    let filled = filled.min(width);

    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for _ in 0..filled {
        bar.push('#');
    }
    for _ in filled..width {
        bar.push('-');
    }
    bar.push(']');
    bar
}

/// Render a captured frame as `ROWS` text lines, one ramp character per
/// pixel with a single space column between characters.
pub fn render_frame_lines(frame: &CapturedFrame) -> Vec<String> {
    let mut lines = Vec::with_capacity(ROWS);
    for row in 0..ROWS {
        let mut line = String::with_capacity(frame.text_len * (COLS + 1));
        for char_index in 0..frame.text_len {
            if char_index > 0 {
                line.push(' ');
            }
            for col in 0..COLS {
                let intensity = frame.intensity_at(char_index, row, col).unwrap_or(0.0);
                line.push(intensity_char(intensity));
            }
        }
        lines.push(line);
    }
    lines
}

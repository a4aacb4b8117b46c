//! Crossterm rendering surface
//!
//! A live terminal backend for the driver: pixel writes are buffered per
//! frame and flushed in one queued batch from [`TerminalSurface::present`].
//! Buffering keeps the [`RenderSurface`] contract infallible; terminal IO
//! errors surface from the presentation call instead.

use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::glyphs::{COLS, ROWS};
use crate::surface::{CapturedFrame, RenderSurface};
use crate::Result;

/// Hide the cursor and clear the screen before the animation runs.
pub fn prepare_screen(out: &mut impl Write) -> Result<()> {
    queue!(out, cursor::Hide, Clear(ClearType::All))?;
    out.flush()?;
    Ok(())
}

/// Restore the cursor and move below the animation area.
pub fn restore_screen(out: &mut impl Write) -> Result<()> {
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, ROWS as u16 + 2),
        cursor::Show
    )?;
    out.flush()?;
    Ok(())
}

/// Terminal LED matrix: one block character per pixel, amber-tinted by
/// intensity and glow.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    origin_col: u16,
    origin_row: u16,
    frame: CapturedFrame,
    completed: bool,
}

impl TerminalSurface {
    /// Surface anchored at the terminal origin.
    pub fn new() -> Self {
        TerminalSurface::default()
    }

    /// Surface anchored at a specific cell.
    pub fn at(origin_col: u16, origin_row: u16) -> Self {
        TerminalSurface {
            origin_col,
            origin_row,
            ..TerminalSurface::default()
        }
    }

    /// Amber LED color for one pixel.
    fn color(intensity: f32, glow: f32) -> Color {
        let level = intensity.clamp(0.0, 1.0);
        let warmth = glow.clamp(0.0, 2.0) / 2.0;
        Color::Rgb {
            r: (level * 255.0) as u8,
            g: (level * (60.0 + 150.0 * warmth)) as u8,
            b: (level * 30.0) as u8,
        }
    }

    /// Flush the last completed frame to the terminal.
    ///
    /// A no-op until the driver has finished at least one frame.
    pub fn present(&mut self, out: &mut impl Write) -> Result<()> {
        if !self.completed {
            return Ok(());
        }

        for row in 0..ROWS {
            queue!(
                out,
                cursor::MoveTo(self.origin_col, self.origin_row + row as u16)
            )?;
            for char_index in 0..self.frame.text_len {
                if char_index > 0 {
                    queue!(out, Print(' '))?;
                }
                for col in 0..COLS {
                    let intensity = self.frame.intensity_at(char_index, row, col).unwrap_or(0.0);
                    let glow = self.frame.glow_at(char_index, row, col).unwrap_or(0.0);
                    queue!(
                        out,
                        SetForegroundColor(Self::color(intensity, glow)),
                        Print('\u{2588}')
                    )?;
                }
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

impl RenderSurface for TerminalSurface {
    fn begin_frame(&mut self, text_len: usize) {
        let cells = text_len * crate::glyphs::PIXELS_PER_CHAR;
        self.frame.text_len = text_len;
        self.frame.intensity.clear();
        self.frame.intensity.resize(cells, 0.0);
        self.frame.glow.clear();
        self.frame.glow.resize(cells, 0.0);
    }

    fn set_pixel(&mut self, char_index: usize, row: usize, col: usize, intensity: f32, glow: f32) {
        if char_index >= self.frame.text_len || row >= ROWS || col >= COLS {
            return;
        }
        let idx = char_index * crate::glyphs::PIXELS_PER_CHAR + row * COLS + col;
        self.frame.intensity[idx] = intensity;
        self.frame.glow[idx] = glow;
    }

    fn end_frame(&mut self) {
        self.frame.frame_index += 1;
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_before_first_frame_writes_nothing() {
        let mut surface = TerminalSurface::new();
        let mut buf = Vec::new();
        surface.present(&mut buf).expect("present");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_present_emits_one_cell_per_pixel() {
        let mut surface = TerminalSurface::new();
        surface.begin_frame(2);
        surface.set_pixel(0, 0, 0, 1.0, 1.0);
        surface.end_frame();

        let mut buf = Vec::new();
        surface.present(&mut buf).expect("present");
        let text = String::from_utf8_lossy(&buf);
        let blocks = text.matches('\u{2588}').count();
        assert_eq!(blocks, 2 * ROWS * COLS);
    }

    #[test]
    fn test_color_scales_with_intensity() {
        let dark = TerminalSurface::color(0.0, 1.0);
        let bright = TerminalSurface::color(1.0, 1.0);
        assert_eq!(dark, Color::Rgb { r: 0, g: 0, b: 0 });
        match bright {
            Color::Rgb { r, g, b } => {
                assert_eq!(r, 255);
                assert!(g > 100, "lit amber needs a green component, got {}", g);
                assert!(b < 40);
            }
            other => panic!("expected RGB color, got {:?}", other),
        }
    }
}

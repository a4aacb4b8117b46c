//! Rendering surface seam
//!
//! The driver writes per-pixel brightness to a [`RenderSurface`] each frame
//! and makes no assumption about what sits behind it: a terminal grid, an
//! LED matrix, a test capture buffer. Surfaces are infallible by contract;
//! backends that can fail buffer internally and surface errors through
//! their own presentation calls.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::glyphs::{COLS, PIXELS_PER_CHAR, ROWS};

/// Per-frame sink for pixel brightness writes.
pub trait RenderSurface {
    /// Called once before the frame's pixel writes.
    fn begin_frame(&mut self, text_len: usize) {
        let _ = text_len;
    }

    /// Write one pixel's modulated levels.
    fn set_pixel(&mut self, char_index: usize, row: usize, col: usize, intensity: f32, glow: f32);

    /// Called once after the frame's pixel writes.
    fn end_frame(&mut self) {}
}

/// Surface that discards every write. Useful for timing-only runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn set_pixel(&mut self, _: usize, _: usize, _: usize, _: f32, _: f32) {}
}

/// One completed frame's pixel levels.
#[derive(Debug, Clone, Default)]
pub struct CapturedFrame {
    /// Number of characters in the frame.
    pub text_len: usize,
    /// Intensity per cell, `char_index * PIXELS_PER_CHAR + row * COLS + col`.
    pub intensity: Vec<f32>,
    /// Glow per cell, same indexing.
    pub glow: Vec<f32>,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl CapturedFrame {
    fn cell(&self, char_index: usize, row: usize, col: usize) -> Option<usize> {
        if char_index >= self.text_len || row >= ROWS || col >= COLS {
            return None;
        }
        let idx = char_index * PIXELS_PER_CHAR + row * COLS + col;
        (idx < self.intensity.len()).then_some(idx)
    }

    /// Intensity at one cell, if in range.
    pub fn intensity_at(&self, char_index: usize, row: usize, col: usize) -> Option<f32> {
        self.cell(char_index, row, col).map(|i| self.intensity[i])
    }

    /// Glow at one cell, if in range.
    pub fn glow_at(&self, char_index: usize, row: usize, col: usize) -> Option<f32> {
        self.cell(char_index, row, col).map(|i| self.glow[i])
    }
}

/// Cloneable read handle onto a [`FrameCapture`]'s latest frame.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    shared: Arc<Mutex<CapturedFrame>>,
}

impl FrameHandle {
    /// Snapshot of the most recently completed frame.
    pub fn latest(&self) -> CapturedFrame {
        self.shared.lock().clone()
    }
}

/// Surface that captures each completed frame behind a lock.
///
/// The driver stays single-threaded; the capture simply lets observers on
/// other threads (or tests) read the latest completed frame. Writes go to a
/// staging buffer and publish atomically on `end_frame`, so a reader never
/// sees a half-written frame.
#[derive(Debug, Default)]
pub struct FrameCapture {
    shared: Arc<Mutex<CapturedFrame>>,
    staging: CapturedFrame,
}

impl FrameCapture {
    /// Create an empty capture surface.
    pub fn new() -> Self {
        FrameCapture::default()
    }

    /// Read handle shareable across threads.
    pub fn handle(&self) -> FrameHandle {
        FrameHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl RenderSurface for FrameCapture {
    fn begin_frame(&mut self, text_len: usize) {
        let cells = text_len * PIXELS_PER_CHAR;
        self.staging.text_len = text_len;
        self.staging.intensity.clear();
        self.staging.intensity.resize(cells, 0.0);
        self.staging.glow.clear();
        self.staging.glow.resize(cells, 0.0);
    }

    fn set_pixel(&mut self, char_index: usize, row: usize, col: usize, intensity: f32, glow: f32) {
        if let Some(idx) = self.staging.cell(char_index, row, col) {
            self.staging.intensity[idx] = intensity;
            self.staging.glow[idx] = glow;
        }
    }

    fn end_frame(&mut self) {
        self.staging.frame_index += 1;
        *self.shared.lock() = self.staging.clone();
    }
}

//! Reveal-order timing calculator
//!
//! Computes, for any (character index, row, col, pattern), the time window
//! during which that pixel fades from background to fully lit. All timing
//! functions are pure and total: out-of-range cells clamp into the grid and
//! a zero per-pixel duration is raised to one millisecond.
//!
//! Every pattern reduces to a *reveal rank* in `[0, PIXELS_PER_CHAR)` per
//! cell, so the offsets within one character are always the exact multiset
//! `{0, ms, 2*ms, ..., 34*ms}` - orders differ, coverage does not, and the
//! total reveal duration is identical across all pattern ids.

mod export;
mod order;
pub mod rng;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::glyphs::{COLS, PIXELS_PER_CHAR, ROWS};

pub use export::write_timing_csv;
pub use rng::SeededRng;

/// Deterministic reveal orderings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PatternId {
    /// Row-major scan, top-left to bottom-right.
    #[default]
    Sequential,
    /// Mirrored sequential: bottom-right to top-left.
    Reverse,
    /// Column-by-column, top to bottom within each column.
    Column,
    /// Row-by-row, left to right within each row.
    Row,
    /// Radial sweep: cells ranked by Euclidean distance from the center.
    Wave,
    /// Diamond sweep: cells ranked by Manhattan distance from the center.
    CenterOut,
    /// Clockwise spiral walk starting at the center cell.
    Spiral,
    /// Seeded pseudo-random permutation keyed by character index.
    Random,
}

impl PatternId {
    /// Every pattern id, in numeric order.
    pub const ALL: [PatternId; 8] = [
        PatternId::Sequential,
        PatternId::Reverse,
        PatternId::Column,
        PatternId::Row,
        PatternId::Wave,
        PatternId::CenterOut,
        PatternId::Spiral,
        PatternId::Random,
    ];

    /// Parse a pattern name as used in configs and on the command line.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sequential" => Some(PatternId::Sequential),
            "reverse" => Some(PatternId::Reverse),
            "column" => Some(PatternId::Column),
            "row" => Some(PatternId::Row),
            "wave" => Some(PatternId::Wave),
            "center-out" => Some(PatternId::CenterOut),
            "spiral" => Some(PatternId::Spiral),
            "random" => Some(PatternId::Random),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternId::Sequential => "sequential",
            PatternId::Reverse => "reverse",
            PatternId::Column => "column",
            PatternId::Row => "row",
            PatternId::Wave => "wave",
            PatternId::CenterOut => "center-out",
            PatternId::Spiral => "spiral",
            PatternId::Random => "random",
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window of one pixel's fade-in, relative to animation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelTiming {
    /// Milliseconds from animation start until the fade-in begins.
    pub start_offset_ms: u64,
    /// Milliseconds from animation start until the pixel is fully lit.
    /// Always `start_offset_ms + ms_per_pixel`.
    pub end_offset_ms: u64,
}

/// Reveal rank of the cell at `(row, col)` for one pattern.
///
/// The rank is the cell's position in the pattern's reveal order, in
/// `[0, PIXELS_PER_CHAR)`. Only the `random` pattern consults `char_index`.
pub fn reveal_rank(char_index: usize, row: usize, col: usize, pattern: PatternId) -> u32 {
    let row = row.min(ROWS - 1);
    let col = col.min(COLS - 1);
    let cell = row * COLS + col;

    match pattern {
        PatternId::Sequential | PatternId::Row => cell as u32,
        PatternId::Reverse => ((ROWS - 1 - row) * COLS + (COLS - 1 - col)) as u32,
        PatternId::Column => (col * ROWS + row) as u32,
        PatternId::Wave => order::wave_ranks()[cell],
        PatternId::CenterOut => order::center_out_ranks()[cell],
        PatternId::Spiral => order::spiral_ranks()[cell],
        PatternId::Random => rng::permutation_ranks(char_index)[cell],
    }
}

/// Fade-in window for one pixel.
///
/// Pure and deterministic: `start = (char_index * 35 + rank) * ms_per_pixel`
/// with the rank from [`reveal_rank`]. A zero `ms_per_pixel` clamps to 1.
pub fn timing_for(
    char_index: usize,
    row: usize,
    col: usize,
    pattern: PatternId,
    ms_per_pixel: u32,
) -> PixelTiming {
    let ms = u64::from(ms_per_pixel.max(1));
    let rank = u64::from(reveal_rank(char_index, row, col, pattern));
    let start = (char_index as u64 * PIXELS_PER_CHAR as u64 + rank) * ms;
    PixelTiming {
        start_offset_ms: start,
        end_offset_ms: start + ms,
    }
}

/// Full timing table for a text of a given length.
///
/// One [`PixelTiming`] per (char_index, row, col), cached so the per-frame
/// path is a plain slice lookup.
#[derive(Debug, Clone)]
pub struct PatternTable {
    pattern: PatternId,
    ms_per_pixel: u32,
    text_len: usize,
    entries: Vec<PixelTiming>,
}

impl PatternTable {
    /// Build the table for `text_len` characters.
    pub fn build(text_len: usize, pattern: PatternId, ms_per_pixel: u32) -> Self {
        let ms_per_pixel = ms_per_pixel.max(1);
        let mut entries = Vec::with_capacity(text_len * PIXELS_PER_CHAR);
        for char_index in 0..text_len {
            for row in 0..ROWS {
                for col in 0..COLS {
                    entries.push(timing_for(char_index, row, col, pattern, ms_per_pixel));
                }
            }
        }
        PatternTable {
            pattern,
            ms_per_pixel,
            text_len,
            entries,
        }
    }

    /// Timing for one cell, if in range.
    pub fn get(&self, char_index: usize, row: usize, col: usize) -> Option<&PixelTiming> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        self.entries
            .get(char_index * PIXELS_PER_CHAR + row * COLS + col)
    }

    /// Pattern id the table was built for.
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// Per-pixel fade duration the table was built for.
    pub fn ms_per_pixel(&self) -> u32 {
        self.ms_per_pixel
    }

    /// Number of characters covered.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// All entries in (char, row, col) order.
    pub fn entries(&self) -> &[PixelTiming] {
        &self.entries
    }

    /// Total reveal duration: `text_len * PIXELS_PER_CHAR * ms_per_pixel`,
    /// identical for every pattern id.
    pub fn total_duration_ms(&self) -> u64 {
        self.text_len as u64 * PIXELS_PER_CHAR as u64 * u64::from(self.ms_per_pixel)
    }
}

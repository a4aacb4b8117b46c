//! Character -> pixel grid lookup
//!
//! Maps characters to fixed-size 7x5 boolean pixel grids. The table is
//! immutable and loaded once; every supported character has identical grid
//! dimensions, and unsupported characters resolve to one fixed fallback
//! glyph rather than failing the lookup.

mod font;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::{LedTextError, Result};

pub use font::FONT_5X7;

/// Glyph grid height in pixels.
pub const ROWS: usize = 7;
/// Glyph grid width in pixels.
pub const COLS: usize = 5;
/// Number of cells in one character's glyph grid.
pub const PIXELS_PER_CHAR: usize = ROWS * COLS;

/// A single character's pixel grid.
///
/// Rows are stored as column bitmasks: bit `c` of `rows[r]` is the cell at
/// `(r, c)`, with `(0, 0)` the top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; ROWS],
}

impl Glyph {
    /// All cells dark (the space character).
    pub const BLANK: Glyph = Glyph { rows: [0; ROWS] };

    /// All cells lit; shown for characters the font does not cover.
    pub const FALLBACK: Glyph = Glyph {
        rows: [0b1_1111; ROWS],
    };

    /// Build a glyph from per-row column bitmasks.
    pub const fn from_rows(rows: [u8; ROWS]) -> Self {
        Glyph { rows }
    }

    /// Whether the cell at `(row, col)` is lit. Out-of-range cells are dark.
    pub fn pixel(&self, row: usize, col: usize) -> bool {
        row < ROWS && col < COLS && (self.rows[row] >> col) & 1 == 1
    }

    /// Number of lit cells in the grid.
    pub fn lit_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }
}

/// Immutable character -> glyph lookup table.
///
/// Lookup never fails: lowercase ASCII folds to uppercase, space maps to
/// [`Glyph::BLANK`], and anything the font does not define resolves to
/// [`Glyph::FALLBACK`].
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    /// Parse a font definition in the [`FONT_5X7`] text format.
    ///
    /// # Errors
    /// Returns [`LedTextError::FontParse`] when the source deviates from the
    /// `glyph <char>` + seven-row format.
    pub fn parse(source: &str) -> Result<Self> {
        let (_, entries) = font::font_source(source).map_err(|e| {
            LedTextError::FontParse(format!("malformed font definition: {e}"))
        })?;

        let mut glyphs: HashMap<char, Glyph> = entries.into_iter().collect();
        glyphs.entry(' ').or_insert(Glyph::BLANK);
        Ok(GlyphTable { glyphs })
    }

    /// The built-in 5x7 table, parsed once on first use.
    pub fn global() -> &'static GlyphTable {
        static TABLE: OnceLock<GlyphTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            GlyphTable::parse(FONT_5X7).expect("embedded 5x7 font definition is valid")
        })
    }

    /// Look up the glyph for `ch`, falling back for unsupported characters.
    pub fn get(&self, ch: char) -> &Glyph {
        self.glyphs
            .get(&ch.to_ascii_uppercase())
            .unwrap_or(&Glyph::FALLBACK)
    }

    /// Whether the font defines `ch` (after case folding).
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch.to_ascii_uppercase())
    }

    /// Number of characters the font defines.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the table is empty. Never true for a parsed font.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_font_parses() {
        let table = GlyphTable::parse(FONT_5X7).expect("embedded font should parse");
        // A-Z + 0-9 + punctuation + implicit space
        assert!(
            table.len() >= 37,
            "expected at least 37 glyphs, got {}",
            table.len()
        );
        assert!(table.contains(' '));
    }

    #[test]
    fn test_known_glyph_shape() {
        let table = GlyphTable::global();
        let a = table.get('A');
        // Crossbar row of 'A' is fully lit
        for col in 0..COLS {
            assert!(a.pixel(3, col), "expected A crossbar lit at col {}", col);
        }
        // Top corners are dark
        assert!(!a.pixel(0, 0));
        assert!(!a.pixel(0, COLS - 1));
    }

    #[test]
    fn test_lowercase_folds_to_uppercase() {
        let table = GlyphTable::global();
        assert_eq!(table.get('h'), table.get('H'));
    }

    #[test]
    fn test_unsupported_char_hits_fallback() {
        let table = GlyphTable::global();
        let glyph = table.get('\u{263A}');
        assert_eq!(glyph, &Glyph::FALLBACK);
        assert_eq!(glyph.lit_count(), PIXELS_PER_CHAR);
    }

    #[test]
    fn test_space_is_blank() {
        let table = GlyphTable::global();
        assert_eq!(table.get(' ').lit_count(), 0);
    }

    #[test]
    fn test_out_of_range_cell_is_dark() {
        let glyph = Glyph::FALLBACK;
        assert!(!glyph.pixel(ROWS, 0));
        assert!(!glyph.pixel(0, COLS));
    }

    #[test]
    fn test_malformed_font_is_rejected() {
        // Six-row glyph: one row short
        let bad = "glyph A\n#####\n#####\n#####\n#####\n#####\n#####\n";
        let err = GlyphTable::parse(bad).unwrap_err();
        assert!(
            matches!(err, LedTextError::FontParse(_)),
            "expected FontParse error, got {:?}",
            err
        );
    }

    #[test]
    fn test_row_bit_order_is_left_to_right() {
        // 'L' has a lit left column and dark right column in its body rows
        let table = GlyphTable::global();
        let l = table.get('L');
        assert!(l.pixel(1, 0));
        assert!(!l.pixel(1, COLS - 1));
    }
}

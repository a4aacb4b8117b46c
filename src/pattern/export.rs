//! Timing-table CSV export for offline inspection.

use std::io::Write;

use crate::glyphs::{COLS, ROWS};
use crate::Result;

use super::PatternTable;

/// Write a pattern table as CSV: one row per (char_index, row, col).
///
/// Intended for debugging reveal orders; the demo binary exposes it as
/// `--dump-timing`.
pub fn write_timing_csv<W: Write>(table: &PatternTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["char_index", "row", "col", "start_offset_ms", "end_offset_ms"])?;

    for char_index in 0..table.text_len() {
        for row in 0..ROWS {
            for col in 0..COLS {
                // In range by construction
                if let Some(timing) = table.get(char_index, row, col) {
                    out.write_record(&[
                        char_index.to_string(),
                        row.to_string(),
                        col.to_string(),
                        timing.start_offset_ms.to_string(),
                        timing.end_offset_ms.to_string(),
                    ])?;
                }
            }
        }
    }

    out.flush().map_err(crate::LedTextError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::PIXELS_PER_CHAR;
    use crate::pattern::PatternId;

    #[test]
    fn test_export_row_count_and_header() {
        let table = PatternTable::build(2, PatternId::Sequential, 30);
        let mut buf = Vec::new();
        write_timing_csv(&table, &mut buf).expect("export should succeed");

        let text = String::from_utf8(buf).expect("csv output is utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 2 * PIXELS_PER_CHAR);
        assert_eq!(
            lines[0],
            "char_index,row,col,start_offset_ms,end_offset_ms"
        );
        assert_eq!(lines[1], "0,0,0,0,30");
    }
}

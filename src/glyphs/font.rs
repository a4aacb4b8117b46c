//! Embedded 5x7 font definition and its parser.
//!
//! The font source is a human-editable text block: each entry is a
//! `glyph <char>` header followed by seven rows of five cells, `#` for lit
//! and `.` for dark. Parsing happens once at table construction.

use nom::{
    bytes::complete::{tag, take_while_m_n},
    character::complete::{anychar, line_ending, multispace0},
    combinator::all_consuming,
    multi::{count, many1},
    sequence::{preceded, terminated},
    IResult,
};

use super::{Glyph, COLS, ROWS};

/// One row of a glyph: exactly `COLS` cells of `#`/`.` and a newline.
fn glyph_row(input: &str) -> IResult<&str, u8> {
    let (input, cells) = take_while_m_n(COLS, COLS, |c| c == '#' || c == '.')(input)?;
    let (input, _) = line_ending(input)?;

    let mut bits = 0u8;
    for (col, cell) in cells.chars().enumerate() {
        if cell == '#' {
            bits |= 1 << col;
        }
    }
    Ok((input, bits))
}

/// One `glyph <char>` entry with its `ROWS` row lines.
fn glyph_entry(input: &str) -> IResult<&str, (char, Glyph)> {
    let (input, _) = tag("glyph ")(input)?;
    let (input, ch) = anychar(input)?;
    let (input, _) = line_ending(input)?;
    let (input, rows) = count(glyph_row, ROWS)(input)?;

    let mut grid = [0u8; ROWS];
    grid.copy_from_slice(&rows);
    Ok((input, (ch, Glyph::from_rows(grid))))
}

/// Full font source: one or more entries separated by blank lines.
pub(super) fn font_source(input: &str) -> IResult<&str, Vec<(char, Glyph)>> {
    all_consuming(terminated(
        many1(preceded(multispace0, glyph_entry)),
        multispace0,
    ))(input)
}

/// Built-in 5x7 LED font: A-Z, 0-9 and common punctuation.
///
/// Lowercase letters are folded to uppercase at lookup time; anything not
/// listed here resolves to the fallback block.
pub const FONT_5X7: &str = "\
glyph A
.###.
#...#
#...#
#####
#...#
#...#
#...#

glyph B
####.
#...#
#...#
####.
#...#
#...#
####.

glyph C
.###.
#...#
#....
#....
#....
#...#
.###.

glyph D
####.
#...#
#...#
#...#
#...#
#...#
####.

glyph E
#####
#....
#....
####.
#....
#....
#####

glyph F
#####
#....
#....
####.
#....
#....
#....

glyph G
.###.
#...#
#....
#.###
#...#
#...#
.###.

glyph H
#...#
#...#
#...#
#####
#...#
#...#
#...#

glyph I
#####
..#..
..#..
..#..
..#..
..#..
#####

glyph J
..###
...#.
...#.
...#.
...#.
#..#.
.##..

glyph K
#...#
#..#.
#.#..
##...
#.#..
#..#.
#...#

glyph L
#....
#....
#....
#....
#....
#....
#####

glyph M
#...#
##.##
#.#.#
#.#.#
#...#
#...#
#...#

glyph N
#...#
##..#
#.#.#
#..##
#...#
#...#
#...#

glyph O
.###.
#...#
#...#
#...#
#...#
#...#
.###.

glyph P
####.
#...#
#...#
####.
#....
#....
#....

glyph Q
.###.
#...#
#...#
#...#
#.#.#
#..#.
.##.#

glyph R
####.
#...#
#...#
####.
#.#..
#..#.
#...#

glyph S
.####
#....
#....
.###.
....#
....#
####.

glyph T
#####
..#..
..#..
..#..
..#..
..#..
..#..

glyph U
#...#
#...#
#...#
#...#
#...#
#...#
.###.

glyph V
#...#
#...#
#...#
#...#
#...#
.#.#.
..#..

glyph W
#...#
#...#
#...#
#.#.#
#.#.#
##.##
#...#

glyph X
#...#
#...#
.#.#.
..#..
.#.#.
#...#
#...#

glyph Y
#...#
#...#
.#.#.
..#..
..#..
..#..
..#..

glyph Z
#####
....#
...#.
..#..
.#...
#....
#####

glyph 0
.###.
#...#
#..##
#.#.#
##..#
#...#
.###.

glyph 1
..#..
.##..
..#..
..#..
..#..
..#..
.###.

glyph 2
.###.
#...#
....#
...#.
..#..
.#...
#####

glyph 3
.###.
#...#
....#
..##.
....#
#...#
.###.

glyph 4
...#.
..##.
.#.#.
#..#.
#####
...#.
...#.

glyph 5
#####
#....
####.
....#
....#
#...#
.###.

glyph 6
..##.
.#...
#....
####.
#...#
#...#
.###.

glyph 7
#####
....#
...#.
..#..
.#...
.#...
.#...

glyph 8
.###.
#...#
#...#
.###.
#...#
#...#
.###.

glyph 9
.###.
#...#
#...#
.####
....#
...#.
.##..

glyph .
.....
.....
.....
.....
.....
..##.
..##.

glyph ,
.....
.....
.....
.....
..##.
...#.
..#..

glyph !
..#..
..#..
..#..
..#..
..#..
.....
..#..

glyph ?
.###.
#...#
....#
...#.
..#..
.....
..#..

glyph -
.....
.....
.....
#####
.....
.....
.....

glyph :
.....
..##.
..##.
.....
..##.
..##.
.....

glyph +
.....
..#..
..#..
#####
..#..
..#..
.....
";

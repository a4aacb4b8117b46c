//! Precomputed reveal-rank tables for the geometry-derived patterns.
//!
//! Wave, center-out and spiral orders are constant for the fixed 7x5 grid,
//! so each table is generated once on first use. Every table is a
//! permutation of `[0, PIXELS_PER_CHAR)`: distance-based orders rank cells
//! by distance from the grid center with the sequential index breaking
//! ties, which keeps per-character offset coverage exact.

use std::sync::OnceLock;

use crate::glyphs::{COLS, PIXELS_PER_CHAR, ROWS};

/// Grid center, the reference point for distance-based orders.
const CENTER_ROW: f64 = (ROWS as f64 - 1.0) / 2.0;
const CENTER_COL: f64 = (COLS as f64 - 1.0) / 2.0;

fn cell_index(row: usize, col: usize) -> usize {
    row * COLS + col
}

/// Rank cells by a per-cell distance metric, ties broken by cell index.
fn ranks_by_distance(distance: impl Fn(usize, usize) -> f64) -> [u32; PIXELS_PER_CHAR] {
    let mut cells: Vec<usize> = (0..PIXELS_PER_CHAR).collect();
    cells.sort_by(|&a, &b| {
        let da = distance(a / COLS, a % COLS);
        let db = distance(b / COLS, b % COLS);
        da.partial_cmp(&db)
            .expect("cell distances are finite")
            .then(a.cmp(&b))
    });

    let mut ranks = [0u32; PIXELS_PER_CHAR];
    for (rank, &cell) in cells.iter().enumerate() {
        ranks[cell] = rank as u32;
    }
    ranks
}

/// Euclidean distance from the grid center (`wave` pattern).
pub(super) fn wave_ranks() -> &'static [u32; PIXELS_PER_CHAR] {
    static RANKS: OnceLock<[u32; PIXELS_PER_CHAR]> = OnceLock::new();
    RANKS.get_or_init(|| {
        ranks_by_distance(|row, col| {
            let dr = row as f64 - CENTER_ROW;
            let dc = col as f64 - CENTER_COL;
            (dr * dr + dc * dc).sqrt()
        })
    })
}

/// Manhattan distance from the grid center (`center-out` pattern).
pub(super) fn center_out_ranks() -> &'static [u32; PIXELS_PER_CHAR] {
    static RANKS: OnceLock<[u32; PIXELS_PER_CHAR]> = OnceLock::new();
    RANKS.get_or_init(|| {
        ranks_by_distance(|row, col| {
            (row as f64 - CENTER_ROW).abs() + (col as f64 - CENTER_COL).abs()
        })
    })
}

/// Clockwise spiral walk starting at the center cell (`spiral` pattern).
///
/// The walk runs on the unbounded plane with the usual 1,1,2,2,3,3,...
/// segment lengths; positions outside the 7x5 grid are skipped, so every
/// cell is visited exactly once.
pub(super) fn spiral_ranks() -> &'static [u32; PIXELS_PER_CHAR] {
    static RANKS: OnceLock<[u32; PIXELS_PER_CHAR]> = OnceLock::new();
    RANKS.get_or_init(|| {
        // Right, down, left, up: clockwise with rows increasing downwards.
        const DIRS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

        let mut ranks = [u32::MAX; PIXELS_PER_CHAR];
        let mut row = CENTER_ROW as i32;
        let mut col = CENTER_COL as i32;
        let mut next_rank = 0u32;
        let mut dir = 0usize;
        let mut segment_len = 1usize;

        let mut visit = |r: i32, c: i32, rank: &mut u32| {
            if (0..ROWS as i32).contains(&r) && (0..COLS as i32).contains(&c) {
                let idx = cell_index(r as usize, c as usize);
                if ranks[idx] == u32::MAX {
                    ranks[idx] = *rank;
                    *rank += 1;
                }
            }
        };

        visit(row, col, &mut next_rank);
        while next_rank < PIXELS_PER_CHAR as u32 {
            // Two segments per length step, then the stride grows.
            for _ in 0..2 {
                let (dr, dc) = DIRS[dir];
                for _ in 0..segment_len {
                    row += dr;
                    col += dc;
                    visit(row, col, &mut next_rank);
                }
                dir = (dir + 1) % 4;
            }
            segment_len += 1;
        }

        ranks
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(ranks: &[u32; PIXELS_PER_CHAR], label: &str) {
        let mut seen = [false; PIXELS_PER_CHAR];
        for &rank in ranks {
            assert!(
                (rank as usize) < PIXELS_PER_CHAR,
                "{}: rank {} out of range",
                label,
                rank
            );
            assert!(!seen[rank as usize], "{}: duplicate rank {}", label, rank);
            seen[rank as usize] = true;
        }
    }

    #[test]
    fn test_distance_orders_are_permutations() {
        assert_permutation(wave_ranks(), "wave");
        assert_permutation(center_out_ranks(), "center-out");
        assert_permutation(spiral_ranks(), "spiral");
    }

    #[test]
    fn test_spiral_starts_at_center() {
        let center = cell_index(CENTER_ROW as usize, CENTER_COL as usize);
        assert_eq!(spiral_ranks()[center], 0);
    }

    #[test]
    fn test_spiral_first_step_moves_right() {
        let right_of_center = cell_index(CENTER_ROW as usize, CENTER_COL as usize + 1);
        assert_eq!(spiral_ranks()[right_of_center], 1);
    }

    #[test]
    fn test_wave_center_first_corner_last() {
        let center = cell_index(CENTER_ROW as usize, CENTER_COL as usize);
        assert_eq!(wave_ranks()[center], 0);
        // (0,0) and (6,0) etc. are the farthest cells; the last rank must be a corner
        let last_cell = wave_ranks()
            .iter()
            .enumerate()
            .max_by_key(|(_, &rank)| rank)
            .map(|(cell, _)| cell)
            .unwrap();
        let (row, col) = (last_cell / COLS, last_cell % COLS);
        assert!(
            (row == 0 || row == ROWS - 1) && (col == 0 || col == COLS - 1),
            "farthest wave cell should be a corner, got ({}, {})",
            row,
            col
        );
    }

    #[test]
    fn test_center_out_respects_manhattan_shells() {
        let ranks = center_out_ranks();
        // Cells one step from center must all rank before cells two steps out
        let one_step = cell_index(CENTER_ROW as usize, CENTER_COL as usize - 1);
        let two_steps = cell_index(CENTER_ROW as usize - 2, CENTER_COL as usize);
        assert!(ranks[one_step] < ranks[two_steps]);
    }
}

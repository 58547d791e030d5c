//! Crossword legality rules for placing a word onto a partially built grid.
//!
//! A placement is legal when:
//! - the word fits inside the grid,
//! - the cells just before its first letter and just after its last letter
//!   are empty (no silent extension of a collinear word),
//! - every occupied cell it passes through is a real crossing: same letter,
//!   covered only by a word of the perpendicular orientation,
//! - every empty cell it fills has empty neighbours on the perpendicular
//!   axis (no parallel words running side by side),
//! - it crosses at least one existing word, unless it is the first word.

use crate::grid::LetterGrid;
use crate::types::{Direction, Position, GRID_SIZE};

/// Check a placement and count its intersections.
///
/// Returns `None` when the placement is illegal, otherwise the number of
/// cells it shares with words already on the grid.
pub fn check_placement(
    grid: &LetterGrid,
    word: &str,
    row: usize,
    col: usize,
    direction: Direction,
    placed_so_far: usize,
) -> Option<usize> {
    let len = word.len();
    if len == 0 {
        return None;
    }

    match direction {
        Direction::Across if col + len > GRID_SIZE || row >= GRID_SIZE => return None,
        Direction::Down if row + len > GRID_SIZE || col >= GRID_SIZE => return None,
        _ => {}
    }

    let (dr, dc) = direction.delta();
    let (dr, dc) = (dr as isize, dc as isize);
    let (r0, c0) = (row as isize, col as isize);
    let n = len as isize;

    if grid.get_signed(r0 - dr, c0 - dc).is_some() {
        return None;
    }
    if grid.get_signed(r0 + dr * n, c0 + dc * n).is_some() {
        return None;
    }

    // Neighbours on the perpendicular axis
    let (pr, pc) = (dc, dr);
    let mut intersections = 0;

    for (i, ch) in word.chars().enumerate() {
        let r = r0 + dr * i as isize;
        let c = c0 + dc * i as isize;
        let pos = Position::new(r as usize, c as usize);

        match grid.get(pos) {
            Some(existing) => {
                if existing != ch {
                    return None;
                }
                if grid.is_covered(pos, direction) {
                    return None;
                }
                if !grid.is_covered(pos, direction.perpendicular()) {
                    return None;
                }
                intersections += 1;
            }
            None => {
                if grid.get_signed(r - pr, c - pc).is_some() {
                    return None;
                }
                if grid.get_signed(r + pr, c + pc).is_some() {
                    return None;
                }
            }
        }
    }

    if placed_so_far > 0 && intersections == 0 {
        return None;
    }

    Some(intersections)
}

/// Whether a word may be placed at `(row, col)` in the given direction
pub fn can_place(
    grid: &LetterGrid,
    word: &str,
    row: usize,
    col: usize,
    direction: Direction,
    placed_so_far: usize,
) -> bool {
    check_placement(grid, word, row, col, direction, placed_so_far).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_planet() -> LetterGrid {
        let mut grid = LetterGrid::new();
        // P L A N E T on row 7, cols 4..=9
        grid.commit("PLANET", 7, 4, Direction::Across);
        grid
    }

    #[test]
    fn test_first_word_needs_no_intersection() {
        let grid = LetterGrid::new();
        assert_eq!(check_placement(&grid, "ORBIT", 0, 0, Direction::Across, 0), Some(0));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = LetterGrid::new();
        assert!(!can_place(&grid, "ASTRONOMY", 0, 10, Direction::Across, 0));
        assert!(!can_place(&grid, "ASTRONOMY", 10, 0, Direction::Down, 0));
        assert!(can_place(&grid, "ASTRONOMY", 6, 0, Direction::Down, 0));
    }

    #[test]
    fn test_valid_crossing() {
        let grid = grid_with_planet();
        // "STAR" down through the A at (7, 6): S(5,6) T(6,6) A(7,6) R(8,6)
        assert_eq!(check_placement(&grid, "STAR", 5, 6, Direction::Down, 1), Some(1));
    }

    #[test]
    fn test_letter_mismatch_rejected() {
        let grid = grid_with_planet();
        // "STOP" would put O on the A
        assert!(!can_place(&grid, "STOP", 5, 6, Direction::Down, 1));
    }

    #[test]
    fn test_no_intersection_rejected_after_first_word() {
        let grid = grid_with_planet();
        assert!(!can_place(&grid, "MOON", 0, 0, Direction::Across, 1));
    }

    #[test]
    fn test_collinear_extension_rejected() {
        let grid = grid_with_planet();
        // Word ending right before PLANET on the same row
        assert!(!can_place(&grid, "SUN", 7, 1, Direction::Across, 1));
        // Word starting right after PLANET
        assert!(!can_place(&grid, "SUN", 7, 10, Direction::Across, 1));
    }

    #[test]
    fn test_same_orientation_overlap_rejected() {
        let grid = grid_with_planet();
        // Every letter matches, but each cell is already covered across
        assert!(!can_place(&grid, "PLANET", 7, 4, Direction::Across, 1));
    }

    #[test]
    fn test_parallel_adjacency_rejected() {
        let grid = grid_with_planet();
        // "LANE" across on row 8 directly below PLANET, never crossing it
        assert!(!can_place(&grid, "LANE", 8, 5, Direction::Across, 1));
        // Down word whose free cell sits beside an existing letter
        // "TAN" down at col 3 would pass (7,3), which touches P at (7,4)
        assert!(!can_place(&grid, "TAN", 6, 3, Direction::Down, 1));
    }

    #[test]
    fn test_crossing_cell_must_be_perpendicular() {
        let mut grid = grid_with_planet();
        grid.commit("STAR", 5, 6, Direction::Down);
        // A down word through (8, 6) would be collinear with STAR
        assert!(!can_place(&grid, "RAT", 8, 6, Direction::Down, 2));
        // An across word through the R of STAR at (8, 6) sits under PLANET
        assert!(!can_place(&grid, "ART", 8, 5, Direction::Across, 2));
    }
}

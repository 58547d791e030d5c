//! Solution-word overlay: picks one grid cell per solution letter.
//!
//! Cells are chosen so that, where possible, every placed word contributes
//! at most one solution letter. Two weaker tiers exist for grids where that
//! cannot be met.

use crate::grid::LetterGrid;
use crate::types::{PlacedWord, Position, SolutionCell};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a solution letter found its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayTier {
    /// Matching letter in words that have not contributed yet
    Fair,
    /// Matching letter, but in a word that already contributed
    Relaxed,
    /// No matching letter left; a grid letter was overwritten
    Patched,
}

/// The chosen solution cells, in solution-word order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub cells: Vec<SolutionCell>,
    pub tiers: Vec<OverlayTier>,
}

impl Overlay {
    /// Whether any grid letter had to be overwritten
    pub fn is_patched(&self) -> bool {
        self.tiers.contains(&OverlayTier::Patched)
    }

    /// Whether every letter met the one-letter-per-word rule
    pub fn is_fair(&self) -> bool {
        self.tiers.iter().all(|&t| t == OverlayTier::Fair)
    }
}

/// Assign a grid cell to every letter of `solution`.
///
/// With `allow_patch` unset, returns `None` as soon as a letter has no
/// matching unclaimed cell anywhere, leaving grid and words untouched. With
/// it set, such a letter takes a random unclaimed cell whose letter is
/// overwritten in both the grid and every placed word crossing it.
pub fn assign_solution_cells<R: Rng + ?Sized>(
    grid: &mut LetterGrid,
    placed: &mut [PlacedWord],
    solution: &str,
    rng: &mut R,
    allow_patch: bool,
) -> Option<Overlay> {
    let mut used_words = vec![false; placed.len()];
    let mut claimed: Vec<Position> = Vec::with_capacity(solution.len());
    let mut cells = Vec::with_capacity(solution.len());
    let mut tiers = Vec::with_capacity(solution.len());

    for (index, target) in solution.chars().enumerate() {
        let unclaimed: Vec<Position> = Position::all()
            .filter(|&p| grid.get(p).is_some() && !claimed.contains(&p))
            .collect();
        let matching: Vec<Position> = unclaimed
            .iter()
            .copied()
            .filter(|&p| grid.get(p) == Some(target))
            .collect();
        let fair: Vec<Position> = matching
            .iter()
            .copied()
            .filter(|&p| touching(placed, p).all(|i| !used_words[i]))
            .collect();

        let (pos, tier) = if let Some(&p) = fair.choose(rng) {
            (p, OverlayTier::Fair)
        } else if let Some(&p) = matching.choose(rng) {
            (p, OverlayTier::Relaxed)
        } else if !allow_patch {
            return None;
        } else if let Some(&p) = unclaimed.choose(rng) {
            patch_letter(grid, placed, p, target);
            (p, OverlayTier::Patched)
        } else {
            warn!(index, letter = %target, "no letter cell left for solution letter");
            continue;
        };

        for i in touching(placed, pos).collect::<Vec<_>>() {
            used_words[i] = true;
        }
        claimed.push(pos);
        cells.push(SolutionCell {
            row: pos.row,
            col: pos.col,
            index,
        });
        tiers.push(tier);
    }

    Some(Overlay { cells, tiers })
}

/// Indices of placed words covering a cell
fn touching(placed: &[PlacedWord], pos: Position) -> impl Iterator<Item = usize> + '_ {
    placed
        .iter()
        .enumerate()
        .filter(move |(_, w)| w.contains(pos))
        .map(|(i, _)| i)
}

/// Overwrite one letter and keep every crossing answer consistent with it
fn patch_letter(grid: &mut LetterGrid, placed: &mut [PlacedWord], pos: Position, letter: char) {
    warn!(row = pos.row, col = pos.col, %letter, "overwriting grid letter for solution word");
    grid.overwrite(pos, letter);
    for word in placed.iter_mut().filter(|w| w.contains(pos)) {
        let offset = (pos.row - word.row) + (pos.col - word.col);
        word.word = word
            .word
            .chars()
            .enumerate()
            .map(|(i, c)| if i == offset { letter } else { c })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(words: &[(&str, usize, usize, Direction)]) -> (LetterGrid, Vec<PlacedWord>) {
        let mut grid = LetterGrid::new();
        let mut placed = Vec::new();
        for &(word, row, col, direction) in words {
            grid.commit(word, row, col, direction);
            placed.push(PlacedWord {
                word: word.to_string(),
                clue: String::new(),
                row,
                col,
                direction,
                number: 0,
            });
        }
        (grid, placed)
    }

    #[test]
    fn test_fair_assignment_spreads_over_words() {
        // COMET across, ORBIT down through the O
        let (mut grid, mut placed) = layout(&[
            ("COMET", 7, 5, Direction::Across),
            ("ORBIT", 7, 6, Direction::Down),
        ]);
        let mut rng = StdRng::seed_from_u64(7);

        // C only appears in COMET, R only in ORBIT
        let overlay = assign_solution_cells(&mut grid, &mut placed, "CR", &mut rng, false).unwrap();
        assert!(overlay.is_fair());
        assert_eq!(overlay.cells[0].position(), Position::new(7, 5));
        assert_eq!(overlay.cells[1].position(), Position::new(8, 6));
    }

    #[test]
    fn test_relaxed_tier_reuses_words() {
        let (mut grid, mut placed) = layout(&[("COMET", 7, 5, Direction::Across)]);
        let mut rng = StdRng::seed_from_u64(1);

        let overlay = assign_solution_cells(&mut grid, &mut placed, "ME", &mut rng, false).unwrap();
        assert_eq!(overlay.tiers, vec![OverlayTier::Fair, OverlayTier::Relaxed]);
        assert_eq!(overlay.cells[1].position(), Position::new(7, 8));
    }

    #[test]
    fn test_missing_letter_without_patch_fails_cleanly() {
        let (mut grid, mut placed) = layout(&[("COMET", 7, 5, Direction::Across)]);
        let before = grid.clone();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(assign_solution_cells(&mut grid, &mut placed, "MZ", &mut rng, false).is_none());
        assert_eq!(grid, before);
        assert_eq!(placed[0].word, "COMET");
    }

    #[test]
    fn test_patch_overwrites_letter_and_words() {
        let (mut grid, mut placed) = layout(&[
            ("COMET", 7, 5, Direction::Across),
            ("ORBIT", 7, 6, Direction::Down),
        ]);
        let mut rng = StdRng::seed_from_u64(3);

        let overlay = assign_solution_cells(&mut grid, &mut placed, "Z", &mut rng, true).unwrap();
        assert!(overlay.is_patched());

        let pos = overlay.cells[0].position();
        assert_eq!(grid.get(pos), Some('Z'));
        for word in placed.iter().filter(|w| w.contains(pos)) {
            assert_eq!(word.letter_at(pos), Some('Z'));
            assert_eq!(word.word.matches('Z').count(), 1);
        }
    }

    #[test]
    fn test_claimed_cells_are_not_reused() {
        let (mut grid, mut placed) = layout(&[("EE", 7, 6, Direction::Across)]);
        let mut rng = StdRng::seed_from_u64(11);

        let overlay = assign_solution_cells(&mut grid, &mut placed, "EE", &mut rng, false).unwrap();
        assert_ne!(overlay.cells[0].position(), overlay.cells[1].position());
    }
}

use crate::grid::LetterGrid;
use crate::legality::check_placement;
use crate::types::{Direction, PlacedWord, WordEntry, CENTER, GRID_SIZE};

/// Points awarded per crossing with an already placed letter
pub const INTERSECTION_SCORE: f64 = 10.0;

/// Penalty per cell of distance between the start cell and the grid centre
pub const CENTRALITY_PENALTY: f64 = 0.5;

/// A scored candidate position for one word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub intersections: usize,
    pub score: f64,
}

/// Score a legal placement: reward crossings, prefer starts near the centre
pub fn score_placement(intersections: usize, row: usize, col: usize) -> f64 {
    let offset = row.abs_diff(CENTER) + col.abs_diff(CENTER);
    INTERSECTION_SCORE * intersections as f64 - CENTRALITY_PENALTY * offset as f64
}

/// Find the highest scoring legal placement of `word`.
///
/// Scans across before down, then rows and columns ascending; the first
/// placement reaching the maximum wins. Placements scoring `<= 0` are never
/// returned.
pub fn best_placement(grid: &LetterGrid, word: &str, placed_so_far: usize) -> Option<Placement> {
    let mut best: Option<Placement> = None;

    for direction in Direction::ALL {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let Some(intersections) =
                    check_placement(grid, word, row, col, direction, placed_so_far)
                else {
                    continue;
                };

                let score = score_placement(intersections, row, col);
                if best.map_or(true, |b| score > b.score) {
                    best = Some(Placement {
                        row,
                        col,
                        direction,
                        intersections,
                        score,
                    });
                }
            }
        }
    }

    best.filter(|b| b.score > 0.0)
}

/// Result of one greedy placement pass
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: LetterGrid,
    pub placed: Vec<PlacedWord>,
}

impl Layout {
    fn empty() -> Self {
        Self {
            grid: LetterGrid::new(),
            placed: Vec::new(),
        }
    }

    fn commit(&mut self, entry: &WordEntry, row: usize, col: usize, direction: Direction) {
        self.grid.commit(&entry.word, row, col, direction);
        self.placed.push(PlacedWord {
            word: entry.word.clone(),
            clue: entry.clue.clone(),
            row,
            col,
            direction,
            number: 0,
        });
    }
}

/// Build a layout greedily from an already ordered word list.
///
/// The first word that fits is seeded across the middle row, centred.
/// Every later word goes to its best scoring placement, or is skipped when
/// it has none. Stops once `max_words` words are on the grid.
pub fn run_attempt(words: &[WordEntry], max_words: usize) -> Layout {
    let mut layout = Layout::empty();
    if max_words == 0 {
        return layout;
    }

    let fits = |e: &&WordEntry| !e.word.is_empty() && e.word.len() <= GRID_SIZE;
    let mut remaining = words.iter().filter(fits);

    let Some(seed) = remaining.next() else {
        return layout;
    };
    let seed_col = (GRID_SIZE - seed.word.len()) / 2;
    layout.commit(seed, CENTER, seed_col, Direction::Across);

    for entry in remaining {
        if layout.placed.len() >= max_words {
            break;
        }
        if let Some(p) = best_placement(&layout.grid, &entry.word, layout.placed.len()) {
            layout.commit(entry, p.row, p.col, p.direction);
        }
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str) -> WordEntry {
        WordEntry::new(word, &format!("Clue for {}", word), "Test")
    }

    #[test]
    fn test_score_prefers_centre() {
        assert_eq!(score_placement(1, 7, 7), 10.0);
        assert_eq!(score_placement(1, 0, 0), 3.0);
        assert!(score_placement(2, 0, 0) > score_placement(1, 7, 7));
    }

    #[test]
    fn test_seed_is_centred_across() {
        let layout = run_attempt(&[entry("COMET")], 28);
        assert_eq!(layout.placed.len(), 1);
        let seed = &layout.placed[0];
        assert_eq!((seed.row, seed.col, seed.direction), (7, 5, Direction::Across));
    }

    #[test]
    fn test_second_word_crosses_seed() {
        let layout = run_attempt(&[entry("COMET"), entry("ORBIT")], 28);
        assert_eq!(layout.placed.len(), 2);
        // Crossing the O at (7, 6) beats crossing the T at (7, 9): the start
        // cell is closer to the centre
        let second = &layout.placed[1];
        assert_eq!((second.row, second.col, second.direction), (7, 6, Direction::Down));
    }

    #[test]
    fn test_unplaceable_word_is_skipped() {
        let layout = run_attempt(&[entry("COMET"), entry("BUZZ"), entry("ORBIT")], 28);
        let words: Vec<&str> = layout.placed.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["COMET", "ORBIT"]);
    }

    #[test]
    fn test_word_cap_is_respected() {
        let words = [entry("COMET"), entry("MOON"), entry("TIME"), entry("ECHO")];
        let layout = run_attempt(&words, 2);
        assert_eq!(layout.placed.len(), 2);
    }

    #[test]
    fn test_best_placement_tie_break_is_scan_order() {
        let mut grid = LetterGrid::new();
        grid.commit("ABA", 7, 6, Direction::Across);
        // "AX" down can start on either A of ABA; (7, 6) is scanned first and
        // both sit one column from centre
        let best = best_placement(&grid, "AX", 1).unwrap();
        assert_eq!((best.row, best.col, best.direction), (7, 6, Direction::Down));
    }
}

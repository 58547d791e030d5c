use crate::grid::LetterGrid;
use crate::numbering::start_cell_numbers;
use crate::types::{Cell, Direction, PlacedWord, Position, SolutionCell, GRID_SIZE};
use serde::{Deserialize, Serialize};

/// A finished crossword: answer grid, clues and the hidden solution word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Vec<Vec<Cell>>,
    pub placed_words: Vec<PlacedWord>,
    pub solution_word: String,
    pub solution_cells: Vec<SolutionCell>,
}

impl Puzzle {
    /// Derive the output cells from a finished layout.
    ///
    /// `placed_words` must already be numbered.
    pub fn assemble(
        letters: &LetterGrid,
        placed_words: Vec<PlacedWord>,
        solution_word: String,
        solution_cells: Vec<SolutionCell>,
    ) -> Self {
        let mut grid: Vec<Vec<Cell>> = (0..GRID_SIZE)
            .map(|row| {
                (0..GRID_SIZE)
                    .map(|col| match letters.get(Position::new(row, col)) {
                        Some(letter) => Cell::with_letter(letter),
                        None => Cell::black(),
                    })
                    .collect()
            })
            .collect();

        for (pos, number) in start_cell_numbers(&placed_words) {
            grid[pos.row][pos.col].number = Some(number);
        }

        for word in &placed_words {
            for pos in word.cells() {
                let cell = &mut grid[pos.row][pos.col];
                match word.direction {
                    Direction::Across => cell.across_clue = Some(word.number),
                    Direction::Down => cell.down_clue = Some(word.number),
                }
            }
        }

        for sc in &solution_cells {
            let cell = &mut grid[sc.row][sc.col];
            cell.is_solution_cell = true;
            cell.solution_index = Some(sc.index);
        }

        Self {
            grid,
            placed_words,
            solution_word,
            solution_cells,
        }
    }

    /// Grid side length
    pub fn size(&self) -> usize {
        self.grid.len()
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.grid[pos.row][pos.col]
    }

    /// Words of one direction, ordered by clue number
    pub fn clues(&self, direction: Direction) -> Vec<&PlacedWord> {
        let mut clues: Vec<&PlacedWord> = self
            .placed_words
            .iter()
            .filter(|w| w.direction == direction)
            .collect();
        clues.sort_by_key(|w| w.number);
        clues
    }

    /// The word of a direction running through a cell
    pub fn word_at(&self, pos: Position, direction: Direction) -> Option<&PlacedWord> {
        self.placed_words
            .iter()
            .find(|w| w.direction == direction && w.contains(pos))
    }

    /// Look up a clue by number and direction
    pub fn word_by_number(&self, number: u32, direction: Direction) -> Option<&PlacedWord> {
        self.placed_words
            .iter()
            .find(|w| w.number == number && w.direction == direction)
    }

    /// Number of cells holding a letter
    pub fn letter_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|c| !c.is_black)
            .count()
    }
}

impl std::fmt::Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.grid {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match (cell.letter, cell.is_solution_cell) {
                    (Some(l), true) => l.to_ascii_lowercase().to_string(),
                    (Some(l), false) => l.to_string(),
                    (None, _) => "#".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::number_clues;

    fn sample() -> Puzzle {
        let mut letters = LetterGrid::new();
        letters.commit("COMET", 7, 5, Direction::Across);
        letters.commit("ORBIT", 7, 6, Direction::Down);
        let mut placed = vec![
            PlacedWord {
                word: "COMET".into(),
                clue: "Icy visitor".into(),
                row: 7,
                col: 5,
                direction: Direction::Across,
                number: 0,
            },
            PlacedWord {
                word: "ORBIT".into(),
                clue: "Path".into(),
                row: 7,
                col: 6,
                direction: Direction::Down,
                number: 0,
            },
        ];
        number_clues(&mut placed);
        let cells = vec![SolutionCell {
            row: 9,
            col: 6,
            index: 0,
        }];
        Puzzle::assemble(&letters, placed, "B".into(), cells)
    }

    #[test]
    fn test_assemble_cells() {
        let puzzle = sample();
        assert_eq!(puzzle.size(), GRID_SIZE);
        assert_eq!(puzzle.letter_count(), 9);

        let crossing = puzzle.cell(Position::new(7, 6));
        assert_eq!(crossing.letter, Some('O'));
        assert_eq!(crossing.number, Some(2));
        assert_eq!(crossing.across_clue, Some(1));
        assert_eq!(crossing.down_clue, Some(2));

        let black = puzzle.cell(Position::new(0, 0));
        assert!(black.is_black);
        assert_eq!(black.letter, None);

        let marked = puzzle.cell(Position::new(9, 6));
        assert!(marked.is_solution_cell);
        assert_eq!(marked.solution_index, Some(0));
        assert_eq!(marked.user_input, None);
        assert!(!marked.revealed && !marked.checked);
        assert_eq!(marked.is_correct, None);
    }

    #[test]
    fn test_clue_lookup() {
        let puzzle = sample();
        let across = puzzle.clues(Direction::Across);
        assert_eq!(across.len(), 1);
        assert_eq!(across[0].word, "COMET");
        assert_eq!(
            puzzle.word_at(Position::new(10, 6), Direction::Down).map(|w| w.number),
            Some(2)
        );
        assert!(puzzle.word_at(Position::new(10, 6), Direction::Across).is_none());
        assert_eq!(
            puzzle.word_by_number(1, Direction::Across).map(|w| w.word.as_str()),
            Some("COMET")
        );
    }

    #[test]
    fn test_display_lowercases_solution_cells() {
        let text = sample().to_string();
        let row9 = text.lines().nth(9).unwrap();
        assert!(row9.contains('b'));
        assert!(text.lines().next().unwrap().starts_with("# #"));
    }
}

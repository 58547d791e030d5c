use serde::{Deserialize, Serialize};

/// Width and height of the puzzle grid
pub const GRID_SIZE: usize = 15;

/// Index of the middle row/column, used by the centrality penalty
pub const CENTER: usize = GRID_SIZE / 2;

/// Orientation of a word on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Both orientations, in scan order
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// The orientation crossing this one
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// (row, col) step taken when walking along a word
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Across => write!(f, "Across"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Every position of the grid in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position::new(row, col)))
    }

    /// Step `n` cells along a direction, if the result stays on the grid
    pub fn step(self, direction: Direction, n: usize) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row + dr * n;
        let col = self.col + dc * n;
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Position::new(row, col))
    }
}

/// An entry of the word pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The answer, uppercase ASCII letters only
    pub word: String,
    /// Clue shown to the player
    pub clue: String,
    /// Theme category the word belongs to
    #[serde(default)]
    pub category: String,
}

impl WordEntry {
    pub fn new(word: &str, clue: &str, category: &str) -> Self {
        Self {
            word: word.to_ascii_uppercase(),
            clue: clue.to_string(),
            category: category.to_string(),
        }
    }
}

/// A word committed to the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    /// Clue number, assigned once placement is finished
    pub number: u32,
}

impl PlacedWord {
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Positions covered by the word, from its first letter to its last
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let (dr, dc) = self.direction.delta();
        (0..self.len()).map(move |i| Position::new(self.row + dr * i, self.col + dc * i))
    }

    pub fn contains(&self, pos: Position) -> bool {
        match self.direction {
            Direction::Across => {
                pos.row == self.row && pos.col >= self.col && pos.col < self.col + self.len()
            }
            Direction::Down => {
                pos.col == self.col && pos.row >= self.row && pos.row < self.row + self.len()
            }
        }
    }

    /// Letter of the answer at a grid position covered by the word
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        if !self.contains(pos) {
            return None;
        }
        let offset = (pos.row - self.row) + (pos.col - self.col);
        self.word.chars().nth(offset)
    }
}

/// A puzzle cell, as handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Answer letter, `None` for black cells
    pub letter: Option<char>,
    /// Letter typed by the player
    pub user_input: Option<char>,
    pub is_black: bool,
    /// Smallest clue number starting at this cell
    pub number: Option<u32>,
    pub across_clue: Option<u32>,
    pub down_clue: Option<u32>,
    pub is_solution_cell: bool,
    /// Position of this cell within the solution word
    pub solution_index: Option<usize>,
    pub revealed: bool,
    pub checked: bool,
    pub is_correct: Option<bool>,
}

impl Cell {
    pub fn black() -> Self {
        Self {
            is_black: true,
            ..Default::default()
        }
    }

    pub fn with_letter(letter: char) -> Self {
        Self {
            letter: Some(letter),
            ..Default::default()
        }
    }

    /// Clue number of the word running through this cell in a direction
    pub fn clue(&self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::Across => self.across_clue,
            Direction::Down => self.down_clue,
        }
    }
}

/// Maps one solution-word letter to the grid cell holding it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionCell {
    pub row: usize,
    pub col: usize,
    pub index: usize,
}

impl SolutionCell {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(word: &str, row: usize, col: usize, direction: Direction) -> PlacedWord {
        PlacedWord {
            word: word.to_string(),
            clue: String::new(),
            row,
            col,
            direction,
            number: 0,
        }
    }

    #[test]
    fn test_position_all_is_row_major() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), GRID_SIZE * GRID_SIZE);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(0, 1));
        assert_eq!(all[GRID_SIZE], Position::new(1, 0));
    }

    #[test]
    fn test_position_step_stays_on_grid() {
        let pos = Position::new(14, 3);
        assert_eq!(pos.step(Direction::Across, 2), Some(Position::new(14, 5)));
        assert_eq!(pos.step(Direction::Down, 1), None);
    }

    #[test]
    fn test_placed_word_cells() {
        let word = placed("CAT", 2, 4, Direction::Down);
        let cells: Vec<Position> = word.cells().collect();
        assert_eq!(
            cells,
            vec![Position::new(2, 4), Position::new(3, 4), Position::new(4, 4)]
        );
        assert!(word.contains(Position::new(3, 4)));
        assert!(!word.contains(Position::new(5, 4)));
        assert_eq!(word.letter_at(Position::new(4, 4)), Some('T'));
        assert_eq!(word.letter_at(Position::new(4, 5)), None);
    }

    #[test]
    fn test_direction_perpendicular() {
        assert_eq!(Direction::Across.perpendicular(), Direction::Down);
        assert_eq!(Direction::Down.perpendicular(), Direction::Across);
        assert_eq!(Direction::Down.to_string(), "Down");
    }

    #[test]
    fn test_word_entry_uppercases() {
        let entry = WordEntry::new("planet", "Orbits a star", "Space");
        assert_eq!(entry.word, "PLANET");
    }
}

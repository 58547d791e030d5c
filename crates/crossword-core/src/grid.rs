use crate::types::{Direction, Position, GRID_SIZE};

/// The working grid of one placement attempt.
///
/// Letters and the occupancy layer (which orientations cover a cell) are
/// only ever changed through [`LetterGrid::commit`]; everything else reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGrid {
    letters: [[Option<char>; GRID_SIZE]; GRID_SIZE],
    across: [[bool; GRID_SIZE]; GRID_SIZE],
    down: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl Default for LetterGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl LetterGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            letters: [[None; GRID_SIZE]; GRID_SIZE],
            across: [[false; GRID_SIZE]; GRID_SIZE],
            down: [[false; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Letter at a position
    pub fn get(&self, pos: Position) -> Option<char> {
        self.letters[pos.row][pos.col]
    }

    /// Letter at signed coordinates; anything off-grid reads as empty
    pub fn get_signed(&self, row: isize, col: isize) -> Option<char> {
        if row < 0 || col < 0 || row >= GRID_SIZE as isize || col >= GRID_SIZE as isize {
            return None;
        }
        self.letters[row as usize][col as usize]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Whether a word of the given orientation already covers the cell
    pub fn is_covered(&self, pos: Position, direction: Direction) -> bool {
        match direction {
            Direction::Across => self.across[pos.row][pos.col],
            Direction::Down => self.down[pos.row][pos.col],
        }
    }

    /// Write a word onto the grid and mark its cells as covered.
    ///
    /// No legality check happens here; callers go through
    /// [`crate::legality::can_place`] first (the seed word is the exception).
    pub fn commit(&mut self, word: &str, row: usize, col: usize, direction: Direction) {
        let (dr, dc) = direction.delta();
        for (i, ch) in word.chars().enumerate() {
            let r = row + dr * i;
            let c = col + dc * i;
            self.letters[r][c] = Some(ch);
            match direction {
                Direction::Across => self.across[r][c] = true,
                Direction::Down => self.down[r][c] = true,
            }
        }
    }

    /// Overwrite a single letter in place.
    ///
    /// Only the solution overlay's last-resort tier uses this.
    pub(crate) fn overwrite(&mut self, pos: Position, letter: char) {
        self.letters[pos.row][pos.col] = Some(letter);
    }

    /// Number of cells holding a letter
    pub fn letter_count(&self) -> usize {
        Position::all().filter(|&p| self.get(p).is_some()).count()
    }

    /// Copy of the raw letter matrix
    pub fn letters(&self) -> [[Option<char>; GRID_SIZE]; GRID_SIZE] {
        self.letters
    }
}

impl std::fmt::Display for LetterGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.letters {
            let line: String = row.iter().map(|c| c.unwrap_or('.')).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_sets_letters_and_coverage() {
        let mut grid = LetterGrid::new();
        grid.commit("RUST", 3, 2, Direction::Across);

        assert_eq!(grid.get(Position::new(3, 2)), Some('R'));
        assert_eq!(grid.get(Position::new(3, 5)), Some('T'));
        assert!(grid.is_covered(Position::new(3, 4), Direction::Across));
        assert!(!grid.is_covered(Position::new(3, 4), Direction::Down));
        assert_eq!(grid.letter_count(), 4);
    }

    #[test]
    fn test_off_grid_reads_empty() {
        let mut grid = LetterGrid::new();
        grid.commit("AB", 0, 0, Direction::Down);
        assert_eq!(grid.get_signed(-1, 0), None);
        assert_eq!(grid.get_signed(0, 15), None);
        assert_eq!(grid.get_signed(1, 0), Some('B'));
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let mut grid = LetterGrid::new();
        grid.commit("HI", 0, 0, Direction::Across);
        let text = grid.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "HI.............");
    }
}

use crossword_core::{Direction, PlacedWord, Position, Puzzle};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A single letter change (for undo/redo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMove {
    pos: Position,
    old_value: Option<char>,
    new_value: Option<char>,
}

/// The game state: one puzzle plus everything the player did to it
#[derive(Clone)]
pub struct Game {
    /// The puzzle; only the solving-state fields of its cells change
    puzzle: Puzzle,
    /// Selected cell
    cursor: Position,
    /// Typing direction
    direction: Direction,
    /// Undo stack
    undo_stack: Vec<GameMove>,
    /// Redo stack
    redo_stack: Vec<GameMove>,
    /// Start time
    start_time: Instant,
    /// Elapsed time (for pause/resume)
    elapsed: Duration,
    /// Whether the game is paused
    paused: bool,
    /// Whether the game is completed
    completed: bool,
    /// Number of check actions used
    checks_used: usize,
    /// Number of cells revealed
    reveals_used: usize,
}

impl Game {
    /// Start solving a freshly generated puzzle
    pub fn new(puzzle: Puzzle) -> Self {
        let (cursor, direction) = Direction::ALL
            .iter()
            .find_map(|&d| puzzle.clues(d).first().map(|w| (w.start(), w.direction)))
            .unwrap_or((Position::new(0, 0), Direction::Across));

        Self {
            puzzle,
            cursor,
            direction,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            completed: false,
            checks_used: 0,
            reveals_used: 0,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn checks_used(&self) -> usize {
        self.checks_used
    }

    pub fn reveals_used(&self) -> usize {
        self.reveals_used
    }

    /// Whether the player changed anything yet
    pub fn has_progress(&self) -> bool {
        !self.undo_stack.is_empty() || self.reveals_used > 0
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }

        if self.paused {
            self.start_time = Instant::now();
        } else {
            self.elapsed += self.start_time.elapsed();
        }
        self.paused = !self.paused;
    }

    fn is_open(&self, pos: Position) -> bool {
        !self.puzzle.cell(pos).is_black
    }

    /// The word being typed into
    pub fn active_word(&self) -> Option<&PlacedWord> {
        self.puzzle
            .word_at(self.cursor, self.direction)
            .or_else(|| self.puzzle.word_at(self.cursor, self.direction.perpendicular()))
    }

    /// Number, direction and text of the active clue
    pub fn current_clue(&self) -> Option<(u32, Direction, &str)> {
        self.active_word()
            .map(|w| (w.number, w.direction, w.clue.as_str()))
    }

    /// Move to the nearest open cell in a direction, skipping black cells
    pub fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let size = self.puzzle.size() as i32;
        let (mut row, mut col) = (self.cursor.row as i32, self.cursor.col as i32);

        loop {
            row += row_delta;
            col += col_delta;
            if row < 0 || col < 0 || row >= size || col >= size {
                return;
            }
            let pos = Position::new(row as usize, col as usize);
            if self.is_open(pos) {
                self.cursor = pos;
                break;
            }
        }

        // Arrow along an axis selects that axis when a word runs that way
        let wanted = if row_delta == 0 { Direction::Across } else { Direction::Down };
        if self.puzzle.word_at(self.cursor, wanted).is_some() {
            self.direction = wanted;
        }
    }

    /// Jump straight to a cell (ignored for black cells)
    pub fn select(&mut self, pos: Position) {
        if pos.row < self.puzzle.size() && pos.col < self.puzzle.size() && self.is_open(pos) {
            self.cursor = pos;
            if self.puzzle.word_at(pos, self.direction).is_none() {
                self.direction = self.direction.perpendicular();
            }
        }
    }

    /// Switch typing direction if a word crosses the cursor
    pub fn toggle_direction(&mut self) {
        let other = self.direction.perpendicular();
        if self.puzzle.word_at(self.cursor, other).is_some() {
            self.direction = other;
        }
    }

    /// All clues in reading order: across by number, then down by number
    fn clue_order(&self) -> Vec<(Position, Direction)> {
        Direction::ALL
            .iter()
            .flat_map(|&d| self.puzzle.clues(d))
            .map(|w| (w.start(), w.direction))
            .collect()
    }

    fn jump_word(&mut self, forward: bool) {
        let order = self.clue_order();
        if order.is_empty() {
            return;
        }
        let current = self.active_word().map(|w| (w.start(), w.direction));
        let idx = current.and_then(|c| order.iter().position(|&o| o == c));
        let next = match (idx, forward) {
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
            (None, _) => 0,
        };
        let (pos, direction) = order[next];
        self.cursor = pos;
        self.direction = direction;
    }

    pub fn next_word(&mut self) {
        self.jump_word(true);
    }

    pub fn prev_word(&mut self) {
        self.jump_word(false);
    }

    fn write_cell(&mut self, pos: Position, value: Option<char>) -> Option<GameMove> {
        let cell = &mut self.puzzle.grid[pos.row][pos.col];
        if cell.is_black || cell.revealed || cell.user_input == value {
            return None;
        }
        let game_move = GameMove {
            pos,
            old_value: cell.user_input,
            new_value: value,
        };
        cell.user_input = value;
        cell.checked = false;
        cell.is_correct = None;
        Some(game_move)
    }

    /// Advance the cursor one cell inside the active word
    fn advance(&mut self, forward: bool) {
        let Some(word) = self.active_word() else {
            return;
        };
        let cells: Vec<Position> = word.cells().collect();
        let direction = word.direction;
        if let Some(i) = cells.iter().position(|&p| p == self.cursor) {
            let next = if forward {
                cells.get(i + 1)
            } else {
                i.checked_sub(1).and_then(|j| cells.get(j))
            };
            if let Some(&pos) = next {
                self.cursor = pos;
                self.direction = direction;
            }
        }
    }

    /// Type a letter at the cursor and move on. Returns false if nothing changed.
    pub fn set_letter(&mut self, letter: char) -> bool {
        if self.completed || self.paused || !letter.is_ascii_alphabetic() {
            return false;
        }

        let changed = match self.write_cell(self.cursor, Some(letter.to_ascii_uppercase())) {
            Some(game_move) => {
                self.undo_stack.push(game_move);
                self.redo_stack.clear();
                true
            }
            None => false,
        };
        self.advance(true);
        self.update_completion();
        changed
    }

    /// Clear the cursor cell, or step back and clear if it is already empty
    pub fn clear_letter(&mut self) -> bool {
        if self.completed || self.paused {
            return false;
        }

        if self.puzzle.cell(self.cursor).user_input.is_none() {
            self.advance(false);
        }
        match self.write_cell(self.cursor, None) {
            Some(game_move) => {
                self.undo_stack.push(game_move);
                self.redo_stack.clear();
                true
            }
            None => false,
        }
    }

    /// Undo the last move
    pub fn undo(&mut self) -> bool {
        if self.completed || self.paused {
            return false;
        }

        while let Some(game_move) = self.undo_stack.pop() {
            if self.write_cell(game_move.pos, game_move.old_value).is_some() {
                self.cursor = game_move.pos;
                self.redo_stack.push(game_move);
                return true;
            }
        }
        false
    }

    /// Redo the last undone move
    pub fn redo(&mut self) -> bool {
        if self.completed || self.paused {
            return false;
        }

        while let Some(game_move) = self.redo_stack.pop() {
            if self.write_cell(game_move.pos, game_move.new_value).is_some() {
                self.cursor = game_move.pos;
                self.undo_stack.push(game_move);
                self.update_completion();
                return true;
            }
        }
        false
    }

    fn active_cells(&self) -> Vec<Position> {
        self.active_word()
            .map(|w| w.cells().collect())
            .unwrap_or_default()
    }

    fn all_open_cells(&self) -> Vec<Position> {
        Position::all().filter(|&p| self.is_open(p)).collect()
    }

    /// Mark filled cells as checked; returns how many are wrong
    fn check(&mut self, cells: &[Position]) -> usize {
        if self.completed || self.paused {
            return 0;
        }
        self.checks_used += 1;

        let mut wrong = 0;
        for &pos in cells {
            let cell = &mut self.puzzle.grid[pos.row][pos.col];
            if let Some(input) = cell.user_input {
                let correct = Some(input) == cell.letter;
                cell.checked = true;
                cell.is_correct = Some(correct);
                if !correct {
                    wrong += 1;
                }
            }
        }
        wrong
    }

    pub fn check_cell(&mut self) -> usize {
        let cursor = self.cursor;
        self.check(&[cursor])
    }

    pub fn check_word(&mut self) -> usize {
        let cells = self.active_cells();
        self.check(&cells)
    }

    pub fn check_puzzle(&mut self) -> usize {
        let cells = self.all_open_cells();
        self.check(&cells)
    }

    /// Fill cells with their answers; returns how many were revealed
    fn reveal(&mut self, cells: &[Position]) -> usize {
        if self.completed || self.paused {
            return 0;
        }

        let mut count = 0;
        for &pos in cells {
            let cell = &mut self.puzzle.grid[pos.row][pos.col];
            if cell.is_black || cell.revealed {
                continue;
            }
            if cell.user_input != cell.letter {
                cell.user_input = cell.letter;
                cell.revealed = true;
                count += 1;
            }
            cell.is_correct = Some(true);
        }
        self.reveals_used += count;
        self.update_completion();
        count
    }

    pub fn reveal_cell(&mut self) -> usize {
        let cursor = self.cursor;
        self.reveal(&[cursor])
    }

    pub fn reveal_word(&mut self) -> usize {
        let cells = self.active_cells();
        self.reveal(&cells)
    }

    pub fn reveal_puzzle(&mut self) -> usize {
        let cells = self.all_open_cells();
        self.reveal(&cells)
    }

    fn update_completion(&mut self) {
        if self.completed {
            return;
        }
        let done = self
            .puzzle
            .grid
            .iter()
            .flatten()
            .filter(|c| !c.is_black)
            .all(|c| c.user_input.is_some() && c.user_input == c.letter);
        if done {
            self.completed = true;
            if !self.paused {
                self.elapsed += self.start_time.elapsed();
            }
        }
    }

    /// Solution word with letters shown only where the player filled the
    /// marked cell correctly
    pub fn solution_progress(&self) -> Vec<Option<char>> {
        self.puzzle
            .solution_cells
            .iter()
            .map(|sc| {
                let cell = self.puzzle.cell(sc.position());
                match (cell.user_input, cell.letter) {
                    (Some(input), Some(letter)) if input == letter => Some(letter),
                    _ => None,
                }
            })
            .collect()
    }

    /// Whether every letter of a word is filled in correctly
    pub fn is_word_solved(&self, word: &PlacedWord) -> bool {
        word.cells().all(|p| {
            let cell = self.puzzle.cell(p);
            cell.user_input.is_some() && cell.user_input == cell.letter
        })
    }

    /// Serialize the game state for saving
    pub fn serialize(&self) -> String {
        let state = SaveState {
            puzzle: self.puzzle.clone(),
            cursor: self.cursor,
            direction: self.direction,
            elapsed_secs: self.elapsed().as_secs(),
            checks_used: self.checks_used,
            reveals_used: self.reveals_used,
        };
        serde_json::to_string(&state).unwrap_or_default()
    }

    /// Deserialize a saved game state
    pub fn deserialize(json: &str) -> Option<Self> {
        let state: SaveState = serde_json::from_str(json).ok()?;

        let mut game = Self::new(state.puzzle);
        game.select(state.cursor);
        if game.puzzle.word_at(game.cursor, state.direction).is_some() {
            game.direction = state.direction;
        }
        game.elapsed = Duration::from_secs(state.elapsed_secs);
        game.paused = true; // Start paused when loading
        game.checks_used = state.checks_used;
        game.reveals_used = state.reveals_used;
        game.update_completion();
        Some(game)
    }
}

#[derive(Serialize, Deserialize)]
struct SaveState {
    puzzle: Puzzle,
    cursor: Position,
    direction: Direction,
    elapsed_secs: u64,
    checks_used: usize,
    reveals_used: usize,
}

use crate::game::Game;
use crate::stats::{now_secs, GameRecord, GameResult, StatsManager};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossword_core::{Generator, Position};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal solving
    Playing,
    /// Puzzle finished
    Win,
    /// Key reference
    Help,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Statistics manager
    pub stats: StatsManager,
    /// Produces new puzzles on request
    generator: Generator,
    /// Whether current game has been recorded (to avoid double recording)
    game_recorded: bool,
    /// Where Ctrl+S writes the game
    save_path: PathBuf,
}

impl App {
    /// Redraw/timer tick
    pub const TICK_RATE: Duration = Duration::from_millis(100);

    /// Create the app and generate the first puzzle
    pub fn new(generator: Generator, theme: Theme) -> Self {
        Self::with_storage(generator, theme, StatsManager::load(), Self::default_save_path())
    }

    /// Create the app with explicit stats and save locations
    pub fn with_storage(
        mut generator: Generator,
        theme: Theme,
        mut stats: StatsManager,
        save_path: PathBuf,
    ) -> Self {
        let game = Game::new(generator.generate());
        stats.record_start();

        Self {
            game,
            theme,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            stats,
            generator,
            game_recorded: false,
            save_path,
        }
    }

    /// Get the save file path
    fn default_save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossword_save.json")
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Playing
            && self.game.is_completed()
            && !self.game_recorded
        {
            let result = if self.game.reveals_used() == 0 {
                GameResult::Solved
            } else {
                GameResult::Assisted
            };
            self.record_game(result);
            self.screen_state = ScreenState::Win;
        }
    }

    /// Record the current game to stats
    fn record_game(&mut self, result: GameResult) {
        if self.game_recorded {
            return;
        }
        self.game_recorded = true;

        let puzzle = self.game.puzzle();
        self.stats.record_game(GameRecord {
            solution_word: puzzle.solution_word.clone(),
            words: puzzle.placed_words.len(),
            result,
            time_secs: self.game.elapsed().as_secs(),
            checks_used: self.game.checks_used(),
            reveals_used: self.game.reveals_used(),
            timestamp: now_secs(),
        });
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('q') {
            self.abandon_if_started();
            return AppAction::Quit;
        }

        match self.screen_state {
            ScreenState::Playing => self.handle_game_key(key, ctrl),
            ScreenState::Win => self.handle_win_key(key, ctrl),
            ScreenState::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::F(1)) {
                    self.screen_state = ScreenState::Playing;
                }
            }
        }
        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Enter => self.new_puzzle(),
            KeyCode::Char('n') if ctrl => self.new_puzzle(),
            // Back to the finished grid
            KeyCode::Esc => self.screen_state = ScreenState::Playing,
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, ctrl: bool) {
        if ctrl {
            match key.code {
                KeyCode::Char('n') => self.new_puzzle(),
                KeyCode::Char('s') => self.save_game(),
                KeyCode::Char('l') => self.load_game(),
                KeyCode::Char('u') | KeyCode::Char('z') => {
                    if self.game.undo() {
                        self.show_message("Undo");
                    }
                }
                KeyCode::Char('r') | KeyCode::Char('y') => {
                    if self.game.redo() {
                        self.show_message("Redo");
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.game.is_paused() {
                    self.show_message("Paused - press F8 to resume");
                } else {
                    self.game.set_letter(c);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.game.clear_letter();
            }

            // Navigation
            KeyCode::Up => self.game.move_cursor(-1, 0),
            KeyCode::Down => self.game.move_cursor(1, 0),
            KeyCode::Left => self.game.move_cursor(0, -1),
            KeyCode::Right => self.game.move_cursor(0, 1),
            KeyCode::Char(' ') => self.game.toggle_direction(),
            KeyCode::Tab => self.game.next_word(),
            KeyCode::BackTab => self.game.prev_word(),

            KeyCode::F(1) | KeyCode::Char('?') => self.screen_state = ScreenState::Help,

            // Checking
            KeyCode::F(2) => {
                let wrong = self.game.check_cell();
                self.report_check(wrong);
            }
            KeyCode::F(3) => {
                let wrong = self.game.check_word();
                self.report_check(wrong);
            }
            KeyCode::F(4) => {
                let wrong = self.game.check_puzzle();
                self.report_check(wrong);
            }

            // Revealing
            KeyCode::F(5) => {
                let count = self.game.reveal_cell();
                self.report_reveal(count);
            }
            KeyCode::F(6) => {
                let count = self.game.reveal_word();
                self.report_reveal(count);
            }
            KeyCode::F(7) => {
                let count = self.game.reveal_puzzle();
                self.report_reveal(count);
            }

            // Pause
            KeyCode::F(8) => {
                self.game.toggle_pause();
                if self.game.is_paused() {
                    self.show_message("Paused");
                } else {
                    self.show_message("Resumed");
                }
            }

            // Theme toggle
            KeyCode::F(9) => {
                self.theme = self.theme.toggled();
                let name = if self.theme.is_dark { "Dark" } else { "Light" };
                self.show_message(&format!("{} theme", name));
            }

            _ => {}
        }
    }

    fn report_check(&mut self, wrong: usize) {
        if self.game.is_paused() || self.game.is_completed() {
            return;
        }
        match wrong {
            0 => self.show_message("No mistakes"),
            1 => self.show_message("1 wrong letter"),
            n => self.show_message(&format!("{} wrong letters", n)),
        }
    }

    fn report_reveal(&mut self, count: usize) {
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            self.show_message(&format!("Revealed {} letter{}", count, plural));
        }
    }

    fn abandon_if_started(&mut self) {
        if !self.game.is_completed() && self.game.has_progress() {
            self.record_game(GameResult::Abandoned);
        }
    }

    /// Replace the current game with a freshly generated puzzle
    pub fn new_puzzle(&mut self) {
        self.abandon_if_started();

        let puzzle = self.generator.generate();
        let message = format!(
            "New puzzle: {} words, {}-letter solution",
            puzzle.placed_words.len(),
            puzzle.solution_word.len()
        );
        self.game = Game::new(puzzle);
        self.game_recorded = false;
        self.stats.record_start();
        self.screen_state = ScreenState::Playing;
        self.show_message(&message);
    }

    /// Save the current game
    fn save_game(&mut self) {
        let json = self.game.serialize();
        match fs::write(&self.save_path, json) {
            Ok(_) => self.show_message("Game saved"),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.save_path.display(), "save failed");
                self.show_message("Failed to save");
            }
        }
    }

    /// Load a saved game
    fn load_game(&mut self) {
        match fs::read_to_string(&self.save_path) {
            Ok(json) => {
                if let Some(game) = Game::deserialize(&json) {
                    self.game = game;
                    self.game_recorded = self.game.is_completed();
                    self.screen_state = ScreenState::Playing;
                    self.show_message("Game loaded (paused, F8 to resume)");
                } else {
                    self.show_message("Invalid save file");
                }
            }
            Err(_) => self.show_message("No save file found"),
        }
    }

    /// Whether a cell belongs to the word being typed
    pub fn is_in_active_word(&self, pos: Position) -> bool {
        self.game.active_word().is_some_and(|w| w.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app(name: &str) -> App {
        let save_path = std::env::temp_dir()
            .join(format!("crossword_app_{}_{}.json", name, std::process::id()));
        App::with_storage(
            Generator::with_seed(3),
            Theme::dark(),
            StatsManager::default(),
            save_path,
        )
    }

    #[test]
    fn test_typing_fills_cursor_cell() {
        let mut app = test_app("typing");
        let start = app.game.cursor();
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.game.puzzle().cell(start).user_input, Some('K'));
        assert!(app.is_in_active_word(app.game.cursor()));
    }

    #[test]
    fn test_help_screen_round_trip() {
        let mut app = test_app("help");
        app.handle_key(key(KeyCode::F(1)));
        assert_eq!(app.screen_state, ScreenState::Help);

        // Letters do nothing while help is open
        let start = app.game.cursor();
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.game.puzzle().cell(start).user_input, None);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen_state, ScreenState::Playing);
    }

    #[test]
    fn test_reveal_puzzle_reaches_win_screen() {
        let mut app = test_app("win");
        app.handle_key(key(KeyCode::F(7)));
        app.tick();
        assert_eq!(app.screen_state, ScreenState::Win);
        assert_eq!(app.stats.player.assisted, 1);
        assert_eq!(app.stats.player.solved, 0);

        // Recording happens once
        app.tick();
        assert_eq!(app.stats.player.total_games, 1);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert!(!app.game.is_completed());
        assert_eq!(app.stats.player.started, 2);
    }

    #[test]
    fn test_new_puzzle_abandons_progress() {
        let mut app = test_app("abandon");
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(ctrl('n'));
        assert_eq!(app.stats.player.abandoned, 1);
        assert!(!app.game.has_progress());
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = test_app("theme");
        assert!(app.theme.is_dark);
        app.handle_key(key(KeyCode::F(9)));
        assert!(!app.theme.is_dark);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_save_then_load() {
        let mut app = test_app("save");
        let start = app.game.cursor();
        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(ctrl('s'));
        assert_eq!(app.message.as_deref(), Some("Game saved"));

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.game.puzzle().cell(start).user_input, None);

        app.handle_key(ctrl('l'));
        assert_eq!(app.game.puzzle().cell(start).user_input, Some('M'));
        assert!(app.game.is_paused());
        let _ = fs::remove_file(&app.save_path);
    }

    #[test]
    fn test_message_expires() {
        let mut app = test_app("message");
        app.show_message("hello");
        for _ in 0..30 {
            app.tick();
        }
        assert!(app.message.is_none());
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = test_app("quit");
        assert!(matches!(app.handle_key(ctrl('q')), AppAction::Quit));
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// How a puzzle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Filled in without revealing anything
    Solved,
    /// Finished with the help of reveals
    Assisted,
    /// Left for a new puzzle or quit
    Abandoned,
}

/// Record of a single played puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub solution_word: String,
    pub words: usize,
    pub result: GameResult,
    pub time_secs: u64,
    pub checks_used: usize,
    pub reveals_used: usize,
    /// Unix timestamp when the game ended
    pub timestamp: u64,
}

/// Overall player statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Puzzles generated or loaded for play
    pub started: usize,
    /// Puzzles that reached an ending
    pub total_games: usize,
    pub solved: usize,
    pub assisted: usize,
    pub abandoned: usize,
    pub current_streak: usize,
    pub best_streak: usize,
    pub best_time_secs: Option<u64>,
    pub total_time_secs: u64,
    pub total_reveals: usize,
}

impl PlayerStats {
    pub fn solve_rate(&self) -> f32 {
        if self.total_games > 0 {
            self.solved as f32 / self.total_games as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_time_secs(&self) -> Option<u64> {
        if self.solved > 0 {
            Some(self.total_time_secs / self.solved as u64)
        } else {
            None
        }
    }
}

/// Maximum number of records kept in history
pub const MAX_HISTORY: usize = 100;

/// Persistent statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsManager {
    pub player: PlayerStats,
    /// Most recent first
    pub history: Vec<GameRecord>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl StatsManager {
    /// Get the save file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossword_stats.json")
    }

    /// Load stats from the user's data directory
    pub fn load() -> Self {
        Self::load_from(Self::save_path())
    }

    /// Load stats from a specific file; a missing or corrupt file starts fresh
    pub fn load_from(path: PathBuf) -> Self {
        let mut stats: Self = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        stats.path = Some(path);
        stats
    }

    /// Save stats to file
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    tracing::warn!(error = %e, path = %path.display(), "failed to save stats");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize stats"),
        }
    }

    /// Count a new puzzle put in front of the player
    pub fn record_start(&mut self) {
        self.player.started += 1;
        self.save();
    }

    /// Record a finished or abandoned game
    pub fn record_game(&mut self, record: GameRecord) {
        let player = &mut self.player;
        player.total_games += 1;
        player.total_reveals += record.reveals_used;

        match record.result {
            GameResult::Solved => {
                player.solved += 1;
                player.current_streak += 1;
                player.best_streak = player.best_streak.max(player.current_streak);
                player.total_time_secs += record.time_secs;
                player.best_time_secs = Some(
                    player
                        .best_time_secs
                        .map_or(record.time_secs, |best| best.min(record.time_secs)),
                );
            }
            GameResult::Assisted => {
                player.assisted += 1;
                player.current_streak = 0;
            }
            GameResult::Abandoned => {
                player.abandoned += 1;
                player.current_streak = 0;
            }
        }

        self.history.insert(0, record);
        self.history.truncate(MAX_HISTORY);
        self.save();
    }
}

/// Current Unix time in seconds
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format seconds as MM:SS or HH:MM:SS
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

use crate::numbering::number_clues;
use crate::overlay::{assign_solution_cells, Overlay};
use crate::placement::{run_attempt, Layout};
use crate::puzzle::Puzzle;
use crate::words::WordPool;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What to do when a solution letter has no matching cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayPolicy {
    /// Discard the layout and build a new one; patch only on the last try
    Regenerate,
    /// Overwrite a grid letter straight away
    Patch,
}

impl Default for OverlayPolicy {
    fn default() -> Self {
        Self::Regenerate
    }
}

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Independent greedy placement attempts per layout
    pub attempts: usize,
    /// Maximum number of words placed on the grid
    pub max_words: usize,
    /// Handling of solution letters missing from the grid
    pub overlay_policy: OverlayPolicy,
    /// Extra layouts tried under [`OverlayPolicy::Regenerate`]
    pub max_regenerations: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl GeneratorConfig {
    pub fn quick() -> Self {
        Self {
            attempts: 3,
            ..Self::standard()
        }
    }

    pub fn standard() -> Self {
        Self {
            attempts: 8,
            max_words: 28,
            overlay_policy: OverlayPolicy::Regenerate,
            max_regenerations: 5,
        }
    }

    pub fn thorough() -> Self {
        Self {
            attempts: 20,
            ..Self::standard()
        }
    }
}

/// Crossword puzzle generator
pub struct Generator {
    config: GeneratorConfig,
    pool: WordPool,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator over the built-in word pool
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            pool: WordPool::builtin(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            pool: WordPool::builtin(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replace the word pool
    pub fn pool(mut self, pool: WordPool) -> Self {
        self.pool = pool;
        self
    }

    /// Replace the configuration
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn current_config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a fresh puzzle.
    ///
    /// Never fails: a thin pool yields a sparse grid, and a solution word
    /// that cannot be spelled from the grid is forced in by overwriting
    /// letters (immediately, or after the configured regenerations).
    pub fn generate(&mut self) -> Puzzle {
        let solution_word = self
            .pool
            .solution_words()
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        let mut regenerations = 0;
        loop {
            let allow_patch = self.config.overlay_policy == OverlayPolicy::Patch
                || regenerations >= self.config.max_regenerations;
            let mut layout = self.best_layout();
            number_clues(&mut layout.placed);

            if let Some(overlay) = assign_solution_cells(
                &mut layout.grid,
                &mut layout.placed,
                &solution_word,
                &mut self.rng,
                allow_patch,
            ) {
                self.log_overlay(&overlay, &solution_word);
                return Puzzle::assemble(&layout.grid, layout.placed, solution_word, overlay.cells);
            }

            regenerations += 1;
            warn!(
                regenerations,
                solution = %solution_word,
                "solution word does not fit layout, regenerating"
            );
        }
    }

    /// Run the configured number of shuffled attempts and keep the one with
    /// the most placed words (the earliest on ties)
    fn best_layout(&mut self) -> Layout {
        let mut words = self.pool.entries().to_vec();
        let mut best: Option<Layout> = None;

        for attempt in 0..self.config.attempts.max(1) {
            words.shuffle(&mut self.rng);
            let layout = run_attempt(&words, self.config.max_words);
            debug!(attempt, placed = layout.placed.len(), "placement attempt finished");

            if best.as_ref().map_or(true, |b| layout.placed.len() > b.placed.len()) {
                best = Some(layout);
            }
        }

        let best = best.unwrap_or_else(|| run_attempt(&words, self.config.max_words));
        info!(
            placed = best.placed.len(),
            letters = best.grid.letter_count(),
            "layout selected"
        );
        best
    }

    fn log_overlay(&self, overlay: &Overlay, solution_word: &str) {
        if overlay.is_patched() {
            warn!(solution = %solution_word, "solution word forced into grid by overwriting letters");
        } else if !overlay.is_fair() {
            warn!(solution = %solution_word, "solution word shares words between letters");
        } else {
            debug!(solution = %solution_word, "solution word placed fairly");
        }
    }
}

/// Generate a puzzle from the built-in word pool with default settings
pub fn generate_puzzle() -> Puzzle {
    Generator::new().generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordEntry;

    #[test]
    fn test_generate_default() {
        let mut generator = Generator::with_seed(42);
        let puzzle = generator.generate();

        assert!(puzzle.placed_words.len() >= 2);
        assert!(puzzle.placed_words.len() <= 28);
        assert_eq!(puzzle.solution_cells.len(), puzzle.solution_word.len());
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let a = Generator::with_seed(7).generate();
        let b = Generator::with_seed(7).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_word_cap() {
        let config = GeneratorConfig {
            max_words: 5,
            ..GeneratorConfig::quick()
        };
        let puzzle = Generator::with_seed(3).config(config).generate();
        assert!(puzzle.placed_words.len() <= 5);
    }

    #[test]
    fn test_solution_word_comes_from_pool() {
        let pool = WordPool::new(
            vec![
                WordEntry::new("COMET", "Icy visitor", "Space"),
                WordEntry::new("ORBIT", "Path", "Space"),
            ],
            vec!["MOB".into()],
        )
        .unwrap();
        let puzzle = Generator::with_seed(9).pool(pool).generate();
        assert_eq!(puzzle.solution_word, "MOB");
        assert_eq!(puzzle.placed_words.len(), 2);
    }

    #[test]
    fn test_presets() {
        assert_eq!(GeneratorConfig::default(), GeneratorConfig::standard());
        assert_eq!(GeneratorConfig::standard().attempts, 8);
        assert!(GeneratorConfig::quick().attempts < GeneratorConfig::thorough().attempts);
        assert_eq!(OverlayPolicy::default(), OverlayPolicy::Regenerate);
    }
}

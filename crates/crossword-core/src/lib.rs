//! Crossword puzzle engine.
//!
//! Packs words from a themed pool into a 15×15 grid, numbers the clues, and
//! hides a solution word whose letters are spread over the placed answers.
//!
//! ```no_run
//! use crossword_core::{Direction, Generator};
//!
//! let puzzle = Generator::with_seed(42).generate();
//! println!("{}", puzzle);
//! for word in puzzle.clues(Direction::Across) {
//!     println!("{}. {}", word.number, word.clue);
//! }
//! ```

pub mod error;
pub mod generator;
pub mod grid;
pub mod legality;
pub mod numbering;
pub mod overlay;
pub mod placement;
pub mod puzzle;
pub mod types;
pub mod words;

pub use error::PoolError;
pub use generator::{generate_puzzle, Generator, GeneratorConfig, OverlayPolicy};
pub use grid::LetterGrid;
pub use legality::{can_place, check_placement};
pub use numbering::number_clues;
pub use overlay::{assign_solution_cells, Overlay, OverlayTier};
pub use placement::{best_placement, run_attempt, Layout, Placement};
pub use puzzle::Puzzle;
pub use types::{Cell, Direction, PlacedWord, Position, SolutionCell, WordEntry, CENTER, GRID_SIZE};
pub use words::WordPool;

//! Basic example of using the crossword engine

use crossword_core::{Direction, Generator, GeneratorConfig, WordPool};

fn main() {
    // Generate a puzzle from the built-in pool
    println!("Generating a puzzle...\n");
    let mut generator = Generator::with_seed(7);
    let puzzle = generator.generate();

    println!("Generated puzzle (solution cells in lowercase):");
    println!("{}", puzzle);

    // Show some stats
    println!("Placed words: {}", puzzle.placed_words.len());
    println!("Letter cells: {}", puzzle.letter_count());
    println!("Solution word: {}\n", puzzle.solution_word);

    for direction in Direction::ALL {
        println!("{}", direction);
        for word in puzzle.clues(direction) {
            println!("  {:>2}. {} ({})", word.number, word.clue, word.word);
        }
    }

    // Restrict the pool to one category
    println!("\n--- Ocean words only, thorough search ---\n");
    match WordPool::builtin().filter_category("ocean") {
        Ok(pool) => {
            let puzzle = Generator::with_config(GeneratorConfig::thorough())
                .pool(pool)
                .generate();
            println!("{}", puzzle);
            println!("Placed words: {}", puzzle.placed_words.len());
        }
        Err(e) => println!("Could not filter pool: {}", e),
    }
}

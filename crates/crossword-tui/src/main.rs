mod app;
mod game;
mod render;
mod stats;
mod theme;

use app::App;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::{Direction, Generator, GeneratorConfig, OverlayPolicy, Puzzle, WordPool};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use std::time::Instant;
use theme::Theme;
use tracing_subscriber::EnvFilter;

/// Search effort presets
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Quick,
    Standard,
    Thorough,
}

#[derive(Parser, Debug)]
#[command(name = "crossword", version, about = "Themed 15x15 crossword puzzles in the terminal")]
struct Args {
    /// Seed for a reproducible puzzle sequence
    #[arg(long)]
    seed: Option<u64>,

    /// JSON word pool to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    words: Option<PathBuf>,

    /// Only use words from this category
    #[arg(long)]
    category: Option<String>,

    /// Search effort
    #[arg(long, value_enum, default_value_t = Preset::Standard)]
    preset: Preset,

    /// Layout attempts per puzzle (overrides the preset)
    #[arg(long)]
    attempts: Option<usize>,

    /// Start with the light theme
    #[arg(long)]
    light: bool,

    /// Print one puzzle with its clues and exit
    #[arg(long)]
    print: bool,

    /// Overwrite grid letters instead of regenerating when the solution word does not fit
    #[arg(long)]
    patch_overlay: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.print);

    let generator = match build_generator(&args) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if args.print {
        let mut generator = generator;
        print_puzzle(&generator.generate());
        return Ok(());
    }

    let theme = if args.light {
        Theme::light()
    } else {
        Theme::dark()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, App::new(generator, theme));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn build_generator(args: &Args) -> Result<Generator, crossword_core::PoolError> {
    let mut pool = match &args.words {
        Some(path) => WordPool::load(path)?,
        None => WordPool::builtin(),
    };
    if let Some(category) = &args.category {
        pool = pool.filter_category(category)?;
    }

    let mut config = match args.preset {
        Preset::Quick => GeneratorConfig::quick(),
        Preset::Standard => GeneratorConfig::standard(),
        Preset::Thorough => GeneratorConfig::thorough(),
    };
    if let Some(attempts) = args.attempts {
        config.attempts = attempts;
    }
    if args.patch_overlay {
        config.overlay_policy = OverlayPolicy::Patch;
    }

    let generator = match args.seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };
    Ok(generator.config(config).pool(pool))
}

/// Logs go to stderr in print mode; the interactive client owns the
/// terminal, so there they go to a file in the local data dir.
fn init_logging(to_stderr: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crossword=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if to_stderr {
        builder.with_writer(io::stderr).init();
        return;
    }

    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crossword.log");
    if let Ok(file) = File::create(path) {
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
}

fn print_puzzle(puzzle: &Puzzle) {
    println!("{}", puzzle);

    for direction in Direction::ALL {
        println!("{}", direction.to_string().to_uppercase());
        for word in puzzle.clues(direction) {
            println!("{:>4}. {} ({})", word.number, word.clue, word.len());
        }
        println!();
    }

    let cells: Vec<String> = puzzle
        .solution_cells
        .iter()
        .map(|c| format!("({},{})", c.row, c.col))
        .collect();
    println!("Solution word: {}  {}", puzzle.solution_word, cells.join(" "));
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let tick_rate = App::TICK_RATE;
    let mut last_tick = Instant::now();

    loop {
        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout for the timer tick
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Ignore key releases on terminals that report them
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick messages and win detection
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

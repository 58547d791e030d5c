use crate::app::{App, ScreenState};
use crate::stats::format_time;
use crossterm::{
    cursor::{Hide, MoveTo},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use crossword_core::{Direction, Position, GRID_SIZE};
use std::io;

/// Characters per grid cell
const CELL_WIDTH: u16 = 3;
/// Grid plus its frame
const GRID_WIDTH: u16 = GRID_SIZE as u16 * CELL_WIDTH + 2;
const GRID_HEIGHT: u16 = GRID_SIZE as u16 + 2;
/// Width of the clue/info column
const PANEL_WIDTH: u16 = 44;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    render_game_screen(stdout, app, term_width, term_height)?;

    match app.screen_state {
        ScreenState::Playing => {}
        ScreenState::Help => render_help(stdout, app, term_width, term_height)?,
        ScreenState::Win => render_win(stdout, app, term_width, term_height)?,
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let total_width = GRID_WIDTH + 3 + PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = 2;

    render_grid(stdout, app, start_x, start_y)?;
    render_controls(stdout, app, start_x, start_y + GRID_HEIGHT + 1)?;

    let panel_x = start_x + GRID_WIDTH + 3;
    let next_y = render_info_panel(stdout, app, panel_x, start_y)?;
    render_clue_lists(stdout, app, panel_x, next_y + 1, term_height)?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let horizontal = "─".repeat(GRID_SIZE * CELL_WIDTH as usize);

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(format!("┌{}┐", horizontal))
    )?;

    for row in 0..GRID_SIZE {
        let cell_y = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;

        for col in 0..GRID_SIZE {
            render_cell(stdout, app, Position::new(row, col))?;
        }

        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("│")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + GRID_HEIGHT - 1),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(format!("└{}┘", horizontal))
    )?;

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let cell = game.puzzle().cell(pos);

    if cell.is_black {
        execute!(stdout, SetBackgroundColor(theme.black_cell), Print("   "))?;
        return Ok(());
    }

    // Background: cursor, then active word, then solution marker
    let bg = if pos == game.cursor() {
        theme.selected_bg
    } else if app.is_in_active_word(pos) {
        theme.highlight_bg
    } else if cell.is_solution_cell {
        theme.solution_bg
    } else {
        theme.cell_bg
    };

    let fg = if cell.revealed {
        theme.revealed
    } else if cell.checked {
        match cell.is_correct {
            Some(false) => theme.error,
            _ => theme.success,
        }
    } else {
        theme.filled
    };

    execute!(stdout, SetBackgroundColor(bg))?;

    // Letters are hidden while paused
    match (cell.user_input, cell.number) {
        (Some(letter), _) if !game.is_paused() => {
            execute!(stdout, SetForegroundColor(fg), Print(format!(" {} ", letter)))?
        }
        (_, Some(number)) => execute!(
            stdout,
            SetForegroundColor(theme.number),
            Print(format!("{:<3}", number))
        )?,
        _ => execute!(stdout, Print("   "))?,
    }

    Ok(())
}

/// Draws title, timer, counters, solution bar and the active clue.
/// Returns the first free row below it.
fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<u16> {
    let theme = &app.theme;
    let game = &app.game;

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print("═══ CROSSWORD ═══")
    )?;

    let timer = if game.is_paused() {
        format!("{} (paused)", game.elapsed_string())
    } else {
        game.elapsed_string()
    };
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print("Time:    "),
        SetForegroundColor(theme.fg),
        Print(timer)
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print("Words:   "),
        SetForegroundColor(theme.fg),
        Print(game.puzzle().placed_words.len())
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print("Checks:  "),
        SetForegroundColor(theme.fg),
        Print(game.checks_used()),
        SetForegroundColor(theme.info),
        Print("   Reveals: "),
        SetForegroundColor(theme.fg),
        Print(game.reveals_used())
    )?;

    // Solution word bar
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print("Solution:"),
        MoveTo(x, y + 7)
    )?;
    for letter in game.solution_progress() {
        let fg = if letter.is_some() { theme.success } else { theme.fg };
        execute!(
            stdout,
            SetBackgroundColor(theme.solution_bg),
            SetForegroundColor(fg),
            Print(format!(" {} ", letter.unwrap_or('_'))),
            SetBackgroundColor(theme.bg),
            Print(" ")
        )?;
    }

    let mut line = y + 9;
    if let Some((number, direction, clue)) = game.current_clue() {
        execute!(
            stdout,
            MoveTo(x, line),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.key),
            Print(format!("{} {}", number, direction))
        )?;
        line += 1;
        for text in wrap_text(clue, PANEL_WIDTH as usize) {
            execute!(
                stdout,
                MoveTo(x, line),
                SetForegroundColor(theme.fg),
                Print(text)
            )?;
            line += 1;
        }
    }

    Ok(line)
}

fn render_clue_lists(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    term_height: u16,
) -> io::Result<()> {
    let available = term_height.saturating_sub(y + 1);
    if available < 6 {
        return Ok(());
    }

    let per_list = available / 2;
    for (i, direction) in Direction::ALL.into_iter().enumerate() {
        render_clue_list(stdout, app, direction, x, y + i as u16 * per_list, per_list)?;
    }
    Ok(())
}

/// One direction's clues, scrolled so the active clue stays visible
fn render_clue_list(
    stdout: &mut io::Stdout,
    app: &App,
    direction: Direction,
    x: u16,
    y: u16,
    height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let clues = game.puzzle().clues(direction);

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print(direction.to_string().to_uppercase())
    )?;

    let visible = height.saturating_sub(2) as usize;
    if visible == 0 {
        return Ok(());
    }

    let active = game
        .active_word()
        .filter(|w| w.direction == direction)
        .and_then(|a| clues.iter().position(|w| w.start() == a.start()));
    let first = active
        .map_or(0, |i| i.saturating_sub(visible / 2))
        .min(clues.len().saturating_sub(visible));

    for (row, (i, word)) in clues.iter().enumerate().skip(first).take(visible).enumerate() {
        let is_active = Some(i) == active;
        let (fg, bg) = if is_active {
            (theme.fg, theme.highlight_bg)
        } else if game.is_word_solved(word) {
            (theme.number, theme.bg)
        } else {
            (theme.info, theme.bg)
        };
        let text = format!("{:>3}. {} ({})", word.number, word.clue, word.len());
        execute!(
            stdout,
            MoveTo(x, y + 1 + row as u16),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(truncate(&text, PANEL_WIDTH as usize))
        )?;
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("A-Z", "Type"),
        ("Arrows", "Move"),
        ("Space", "Direction"),
        ("Tab", "Next clue"),
        ("Bksp", "Erase"),
        ("F1", "Help"),
        ("F2-F4", "Check"),
        ("F5-F7", "Reveal"),
        ("F8", "Pause"),
        ("F9", "Theme"),
        ("^N", "New"),
        ("^S/^L", "Save/Load"),
        ("^U/^R", "Undo/Redo"),
        ("^Q", "Quit"),
    ];

    // 3 columns of 5 rows
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 5;
        let row = i % 5;
        let cx = x + (col as u16) * 16;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;

    Ok(())
}

/// Fill a centered rectangle and return its top-left corner
fn draw_box(
    stdout: &mut io::Stdout,
    bg: Color,
    width: u16,
    height: u16,
    term_width: u16,
    term_height: u16,
) -> io::Result<(u16, u16)> {
    let x = term_width.saturating_sub(width) / 2;
    let y = term_height.saturating_sub(height) / 2;

    for row in 0..height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(width as usize))
        )?;
    }
    Ok((x, y))
}

fn render_help(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let keys = [
        ("A-Z", "Type a letter and advance"),
        ("Backspace/Del", "Erase, stepping back when empty"),
        ("Arrows", "Move, skipping black cells"),
        ("Space", "Switch Across/Down"),
        ("Tab / Shift+Tab", "Next / previous clue"),
        ("F2 / F3 / F4", "Check cell / word / puzzle"),
        ("F5 / F6 / F7", "Reveal cell / word / puzzle"),
        ("F8", "Pause timer"),
        ("F9", "Dark / light theme"),
        ("Ctrl+N", "New puzzle"),
        ("Ctrl+S / Ctrl+L", "Save / load game"),
        ("Ctrl+U / Ctrl+R", "Undo / redo"),
        ("Ctrl+Q", "Quit"),
    ];

    let width = 52;
    let height = keys.len() as u16 + 6;
    let (x, y) = draw_box(stdout, theme.highlight_bg, width, height, term_width, term_height)?;

    execute!(
        stdout,
        MoveTo(x + 2, y + 1),
        SetForegroundColor(theme.key),
        Print("Keys")
    )?;
    for (i, (key, desc)) in keys.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x + 2, y + 3 + i as u16),
            SetForegroundColor(theme.key),
            Print(format!("{:<17}", key)),
            SetForegroundColor(theme.fg),
            Print(desc)
        )?;
    }
    execute!(
        stdout,
        MoveTo(x + 2, y + height - 2),
        SetForegroundColor(theme.info),
        Print("Esc to close")
    )?;

    Ok(())
}

fn render_win(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let player = &app.stats.player;

    let width = 44;
    let height = 12;
    let (x, y) = draw_box(stdout, theme.highlight_bg, width, height, term_width, term_height)?;

    let title = if game.reveals_used() == 0 {
        "Puzzle solved!"
    } else {
        "Puzzle complete"
    };
    let best = player
        .best_time_secs
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());

    let lines = [
        (theme.success, title.to_string()),
        (theme.fg, String::new()),
        (
            theme.fg,
            format!("Solution word: {}", game.puzzle().solution_word),
        ),
        (theme.fg, format!("Time: {}", game.elapsed_string())),
        (
            theme.info,
            format!(
                "Checks: {}   Reveals: {}",
                game.checks_used(),
                game.reveals_used()
            ),
        ),
        (
            theme.info,
            format!("Solved: {}   Best: {}", player.solved, best),
        ),
        (theme.fg, String::new()),
        (theme.key, "Enter: new puzzle   Esc: view grid".to_string()),
        (theme.key, "Ctrl+Q: quit".to_string()),
    ];

    for (i, (color, text)) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x + 2, y + 1 + i as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }

    Ok(())
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Sixth planet from the sun", 12);
        assert_eq!(lines, vec!["Sixth planet", "from the sun"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Comet", 10), "Comet");
        assert_eq!(truncate("Shooting star", 8), "Shootin…");
    }
}

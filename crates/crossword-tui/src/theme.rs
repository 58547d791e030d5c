use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Blocked (black) cell color
    pub black_cell: Color,
    /// Open cell background
    pub cell_bg: Color,
    /// Clue number color
    pub number: Color,
    /// Player-entered letter color
    pub filled: Color,
    /// Revealed letter color
    pub revealed: Color,
    /// Cursor cell background
    pub selected_bg: Color,
    /// Background of the word under the cursor
    pub highlight_bg: Color,
    /// Solution-word cell background
    pub solution_bg: Color,
    /// Wrong letter color (after a check)
    pub error: Color,
    /// Correct letter / success color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Whether this is the dark variant
    pub is_dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            black_cell: Color::Rgb { r: 8, g: 8, b: 12 },
            cell_bg: Color::Rgb { r: 38, g: 42, b: 56 },
            number: Color::Rgb { r: 120, g: 128, b: 150 },
            filled: Color::Rgb { r: 80, g: 180, b: 255 },
            revealed: Color::Rgb { r: 200, g: 150, b: 255 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            highlight_bg: Color::Rgb { r: 50, g: 58, b: 82 },
            solution_bg: Color::Rgb { r: 90, g: 70, b: 30 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            is_dark: true,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            black_cell: Color::Rgb { r: 40, g: 40, b: 48 },
            cell_bg: Color::Rgb { r: 255, g: 255, b: 255 },
            number: Color::Rgb { r: 130, g: 130, b: 150 },
            filled: Color::Rgb { r: 30, g: 100, b: 200 },
            revealed: Color::Rgb { r: 120, g: 60, b: 180 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            highlight_bg: Color::Rgb { r: 222, g: 230, b: 250 },
            solution_bg: Color::Rgb { r: 255, g: 230, b: 160 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            is_dark: false,
        }
    }

    /// The other variant (dark mode toggle)
    pub fn toggled(&self) -> Self {
        if self.is_dark {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

//! The console cursor model over a `TextSurface`

use alloc::string::String;

use textos_driver_traits::{TextSurface, COLS, GRID_SIZE};

use crate::color::Color;

/// Row where command input begins; the cursor wraps back here instead of
/// scrolling, leaving rows 0..3 for the splash banner.
pub const INPUT_START_ROW: usize = 3;

/// Active colors plus the splash banner configuration.
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub splash_fg: Color,
    pub banner: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            fg: Color::White,
            bg: Color::Blue,
            splash_fg: Color::Yellow,
            banner: String::from("Welcome to TEXTOS!"),
        }
    }
}

/// The shared console: one linear cursor over the grid, every write under
/// the current theme unless a caller asks for an explicit color.
pub struct Console<S: TextSurface> {
    surface: S,
    cursor: usize,
    theme: Theme,
}

impl<S: TextSurface> Console<S> {
    pub fn new(surface: S) -> Self {
        Console {
            surface,
            cursor: INPUT_START_ROW * COLS,
            theme: Theme::default(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn set_colors(&mut self, fg: Color, bg: Color) {
        self.theme.fg = fg;
        self.theme.bg = bg;
    }

    pub fn set_splash_fg(&mut self, fg: Color) {
        self.theme.splash_fg = fg;
    }

    /// Replace the banner text, bounded to one row.
    pub fn set_banner(&mut self, text: &str) {
        let mut banner = String::from(text);
        banner.truncate(COLS);
        self.theme.banner = banner;
    }

    /// Fill every cell with a blank under the current theme and park the
    /// cursor at the input start row.
    pub fn clear(&mut self) {
        let attr = Color::attr(self.theme.fg, self.theme.bg);
        for offset in 0..GRID_SIZE {
            self.surface.write_cell(offset, b' ', attr);
        }
        self.cursor = INPUT_START_ROW * COLS;
        self.surface.set_cursor(self.cursor);
    }

    /// Write a string starting at (row, col) under the current theme.
    ///
    /// Does not move the shared cursor. The caller keeps the text within
    /// the grid; cells past the end are dropped by the surface.
    pub fn print_at(&mut self, text: &str, row: usize, col: usize) {
        let attr = Color::attr(self.theme.fg, self.theme.bg);
        self.write_row(text, row, col, attr);
    }

    /// Like `print_at` but with an explicit foreground over the theme
    /// background.
    pub fn print_at_colored(&mut self, text: &str, row: usize, col: usize, fg: Color) {
        let attr = Color::attr(fg, self.theme.bg);
        self.write_row(text, row, col, attr);
    }

    fn write_row(&mut self, text: &str, row: usize, col: usize, attr: u8) {
        let mut offset = row * COLS + col;
        for &byte in text.as_bytes() {
            self.surface.write_cell(offset, byte, attr);
            offset += 1;
        }
    }

    /// Write one character at the cursor and advance it.
    ///
    /// Newline moves to column 0 of the next row. When the cursor would
    /// leave the grid it wraps back to the input start row; nothing
    /// scrolls. The hardware cursor is synchronized after every call.
    pub fn put_char(&mut self, ch: u8) {
        if ch == b'\n' {
            self.cursor = (self.cursor / COLS + 1) * COLS;
        } else {
            let attr = Color::attr(self.theme.fg, self.theme.bg);
            self.surface.write_cell(self.cursor, ch, attr);
            self.cursor += 1;
        }
        if self.cursor >= GRID_SIZE {
            self.cursor = INPUT_START_ROW * COLS;
        }
        self.surface.set_cursor(self.cursor);
    }

    /// Write a string through `put_char`.
    pub fn print(&mut self, text: &str) {
        for &byte in text.as_bytes() {
            self.put_char(byte);
        }
    }

    /// Write a string at the cursor in an explicit foreground color,
    /// advancing the cursor. This bypasses the theme foreground entirely.
    pub fn print_colored(&mut self, text: &str, fg: Color) {
        let attr = Color::attr(fg, self.theme.bg);
        for &byte in text.as_bytes() {
            if byte == b'\n' {
                self.cursor = (self.cursor / COLS + 1) * COLS;
            } else {
                self.surface.write_cell(self.cursor, byte, attr);
                self.cursor += 1;
            }
            if self.cursor >= GRID_SIZE {
                self.cursor = INPUT_START_ROW * COLS;
            }
        }
        self.surface.set_cursor(self.cursor);
    }

    /// Step the cursor back one cell and blank it with the given colors.
    /// No-op at offset zero.
    pub fn erase_back(&mut self, fg: Color, bg: Color) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.surface.write_cell(self.cursor, b' ', Color::attr(fg, bg));
        self.surface.set_cursor(self.cursor);
    }

    /// Blank the cell under the cursor with the given colors without
    /// moving the cursor.
    pub fn erase_at(&mut self, fg: Color, bg: Color) {
        self.surface.write_cell(self.cursor, b' ', Color::attr(fg, bg));
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor / COLS
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor % COLS
    }

    /// Park the cursor at column 0 of the given row.
    pub fn set_cursor_row(&mut self, row: usize) {
        self.cursor = (row * COLS).min(GRID_SIZE - COLS);
        self.surface.set_cursor(self.cursor);
    }

    /// Draw the splash banner centered on row 0 in the splash color.
    pub fn draw_banner(&mut self) {
        let attr = Color::attr(self.theme.splash_fg, self.theme.bg);
        let len = self.theme.banner.len().min(COLS);
        let col = (COLS - len) / 2;
        for (i, &byte) in self.theme.banner.as_bytes()[..len].iter().enumerate() {
            self.surface.write_cell(col + i, byte, attr);
        }
    }

    /// Paint a `height` x `width` rectangle of `glyph` from the origin.
    /// Dimensions are clamped to the grid.
    pub fn fill_rect(&mut self, glyph: u8, fg: Color, bg: Color, height: usize, width: usize) {
        let attr = Color::attr(fg, bg);
        let height = height.min(textos_driver_traits::ROWS);
        let width = width.min(COLS);
        for row in 0..height {
            for col in 0..width {
                self.surface.write_cell(row * COLS + col, glyph, attr);
            }
        }
    }
}

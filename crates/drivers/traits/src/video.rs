//! Text Surface Capability
//!
//! The display as the core sees it: a fixed 80x25 grid of 16-bit cells
//! (low byte glyph, high byte packed color attribute) plus a hardware
//! cursor indicator. Writing is the only operation the core requires.

/// Grid width in cells
pub const COLS: usize = 80;
/// Grid height in cells
pub const ROWS: usize = 25;
/// Total cell count
pub const GRID_SIZE: usize = COLS * ROWS;

/// A writable character-cell surface with a cursor indicator.
///
/// `offset` is a linear cell index in `[0, GRID_SIZE)`. Implementations
/// ignore writes beyond the grid rather than faulting.
pub trait TextSurface {
    /// Write one cell: glyph byte plus packed attribute (bg << 4 | fg)
    fn write_cell(&mut self, offset: usize, glyph: u8, attr: u8);

    /// Move the visible cursor indicator to the given cell
    fn set_cursor(&mut self, offset: usize);
}

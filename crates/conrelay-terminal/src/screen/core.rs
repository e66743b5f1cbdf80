//! Screen struct definition and construction helpers.

use super::types::{Cell, CursorState};

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Character buffer of the terminal surface.
///
/// Much taller than the window the hosted program sees, like a console
/// screen buffer, so output accumulates downwards until flow control
/// starts a new page.
pub struct Screen {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<Vec<Cell>>,
    pub cursor: CursorState,
    pub saved_cursor: Option<CursorState>,
    /// Delayed-wrap flag (wrap on *next* printable character).
    pub wrap_pending: bool,
    /// Per-row damaged column span, inclusive.
    pub(crate) damage: Vec<Option<(usize, usize)>>,
}

impl Screen {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: Self::blank_cells(cols, rows),
            cursor: CursorState::default(),
            saved_cursor: None,
            wrap_pending: false,
            damage: vec![None; rows],
        }
    }

    pub(crate) fn blank_cells(cols: usize, rows: usize) -> Vec<Vec<Cell>> {
        (0..rows).map(|_| Self::blank_row(cols)).collect()
    }

    pub(crate) fn blank_row(cols: usize) -> Vec<Cell> {
        (0..cols).map(|_| Cell::default()).collect()
    }

    // -- reset --------------------------------------------------------------

    /// Blank the whole buffer, home the cursor and forget pending damage.
    pub fn clear(&mut self) {
        self.cells = Self::blank_cells(self.cols, self.rows);
        self.cursor = CursorState::default();
        self.wrap_pending = false;
        self.damage = vec![None; self.rows];
    }
}

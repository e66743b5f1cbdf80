//! Cursor movement, save/restore, and control characters.

use super::core::Screen;

impl Screen {
    /// Move cursor to an absolute position, clamped to screen bounds.
    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor.row = row.min(self.rows.saturating_sub(1));
        self.cursor.col = col.min(self.cols.saturating_sub(1));
        self.wrap_pending = false;
    }

    /// Move cursor relative to current position.
    pub fn move_cursor_relative(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor.row as i64 + i64::from(d_row)).max(0) as usize;
        let col = (self.cursor.col as i64 + i64::from(d_col)).max(0) as usize;
        self.move_cursor(row, col);
    }

    // -- cursor save / restore (DECSC / DECRC) ------------------------------

    pub fn save_cursor(&mut self) {
        self.saved_cursor = Some(self.cursor.clone());
    }

    pub fn restore_cursor(&mut self) {
        if let Some(saved) = self.saved_cursor.take() {
            self.move_cursor(saved.row, saved.col);
        }
        self.wrap_pending = false;
    }

    // -- control characters -------------------------------------------------

    /// Line feed: move cursor down one line, scrolling at the bottom.
    pub fn newline(&mut self) {
        if self.cursor.row + 1 >= self.rows {
            self.scroll_up(1);
        } else {
            self.cursor.row += 1;
        }
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.wrap_pending = false;
    }

    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        }
        self.wrap_pending = false;
    }

    /// Advance to the next multiple-of-eight tab stop.
    pub fn tab(&mut self) {
        let next = (self.cursor.col / 8 + 1) * 8;
        self.cursor.col = next.min(self.cols.saturating_sub(1));
        self.wrap_pending = false;
    }
}

//! Erase operations: erase in display, erase in line, erase chars.

use super::core::Screen;
use super::types::Cell;

impl Screen {
    fn blank_span(&mut self, row: usize, left: usize, right: usize) {
        if row >= self.rows || left >= self.cols {
            return;
        }
        let right = right.min(self.cols - 1);
        for c in left..=right {
            self.cells[row][c] = Cell::default();
        }
        self.mark_cells(row, left, right);
    }

    /// Erase in display.
    ///   0 = cursor to end, 1 = start to cursor, 2 = entire screen,
    ///   3 = scrollback (no-op here).
    pub fn erase_in_display(&mut self, mode: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let last = self.cols.saturating_sub(1);
        match mode {
            0 => {
                self.blank_span(row, col, last);
                for r in (row + 1)..self.rows {
                    self.blank_span(r, 0, last);
                }
            }
            1 => {
                for r in 0..row {
                    self.blank_span(r, 0, last);
                }
                self.blank_span(row, 0, col);
            }
            2 => {
                for r in 0..self.rows {
                    self.blank_span(r, 0, last);
                }
            }
            _ => {}
        }
    }

    /// Erase in line.
    ///   0 = cursor to end, 1 = start to cursor, 2 = entire line.
    pub fn erase_in_line(&mut self, mode: u16) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        let last = self.cols.saturating_sub(1);
        match mode {
            0 => self.blank_span(row, col, last),
            1 => self.blank_span(row, 0, col),
            2 => self.blank_span(row, 0, last),
            _ => {}
        }
    }

    /// Erase `count` characters starting at the cursor (replace with blanks).
    pub fn erase_chars(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let (row, col) = (self.cursor.row, self.cursor.col);
        self.blank_span(row, col, col + count - 1);
    }

    /// Delete `count` characters at the cursor, shifting the rest left.
    pub fn delete_chars(&mut self, count: usize) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        if row >= self.rows || col >= self.cols {
            return;
        }
        let count = count.min(self.cols - col);
        self.cells[row].drain(col..col + count);
        self.cells[row].resize(self.cols, Cell::default());
        self.mark_cells(row, col, self.cols - 1);
    }
}

//! Character output and text extraction.

use unicode_width::UnicodeWidthChar;

use super::core::Screen;
use super::types::Cell;

impl Screen {
    /// Write a character at the cursor position, then advance the cursor.
    /// Handles wide characters and auto-wrap.
    pub fn put_char(&mut self, c: char) {
        let char_width = c.width().unwrap_or(0) as u8;
        let display_width = if char_width == 0 { 1 } else { char_width };

        if self.wrap_pending {
            self.wrap_pending = false;
            self.cursor.col = 0;
            self.newline();
        }

        // A wide character never straddles the right margin.
        if display_width == 2 && self.cursor.col + 1 >= self.cols {
            let (row, col) = (self.cursor.row, self.cursor.col);
            self.cells[row][col] = Cell::default();
            self.mark_cells(row, col, col);
            self.cursor.col = 0;
            self.newline();
        }

        let row = self.cursor.row;
        let col = self.cursor.col;

        if row < self.rows && col < self.cols {
            self.cells[row][col] = Cell {
                c,
                width: display_width,
            };
            let mut right = col;
            if display_width == 2 && col + 1 < self.cols {
                self.cells[row][col + 1] = Cell { c: ' ', width: 0 };
                right = col + 1;
            }
            self.mark_cells(row, col, right);
        }

        let new_col = col + display_width as usize;
        if new_col >= self.cols {
            self.cursor.col = self.cols - 1;
            self.wrap_pending = true;
        } else {
            self.cursor.col = new_col;
        }
    }

    // -- text extraction ----------------------------------------------------

    /// Text of `row` between columns `left` and `right` inclusive, with
    /// wide-character continuation cells skipped. Out-of-range requests are
    /// clipped.
    pub fn row_text(&self, row: usize, left: usize, right: usize) -> String {
        if row >= self.rows || left >= self.cols {
            return String::new();
        }
        let right = right.min(self.cols - 1);
        if left > right {
            return String::new();
        }
        self.cells[row][left..=right]
            .iter()
            .filter(|cell| cell.width != 0)
            .map(|cell| cell.c)
            .collect()
    }
}

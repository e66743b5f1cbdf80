//! Scrolling.

use super::core::Screen;

impl Screen {
    /// Scroll the whole buffer up by `count` lines, discarding the top rows.
    ///
    /// Uses `drain` + `extend` for O(n) bulk moves.
    pub fn scroll_up(&mut self, count: usize) {
        let count = count.min(self.rows);
        if count == 0 {
            return;
        }
        self.cells.drain(..count);
        let blanks = (0..count).map(|_| Self::blank_row(self.cols));
        self.cells.extend(blanks);
        self.mark_rows(0, self.rows);
    }
}

//! CSI dispatch: cursor movement, erasing, delete and scrolling.
//! Rendition and mode changes have no effect on relayed text.

use tracing::trace;
use vte::Params;

use crate::screen::Screen;

impl Screen {
    pub(crate) fn dispatch_csi(&mut self, params: &Params, intermediates: &[u8], action: char) {
        let mut flat_buf = [0u16; 32];
        let mut flat_len = 0;
        for sub in params.iter() {
            if flat_len < flat_buf.len() {
                flat_buf[flat_len] = sub[0];
                flat_len += 1;
            }
        }
        let flat = &flat_buf[..flat_len];

        let p1 = || flat.first().copied().unwrap_or(0);
        let p1_one = || usize::from(p1().max(1));
        let p2 = || flat.get(1).copied().unwrap_or(0);

        if intermediates.first() == Some(&b'?') {
            // DEC private modes.
            return;
        }

        match action {
            'A' => self.move_cursor_relative(-(p1_one() as i32), 0),
            'B' => self.move_cursor_relative(p1_one() as i32, 0),
            'C' => self.move_cursor_relative(0, p1_one() as i32),
            'D' => self.move_cursor_relative(0, -(p1_one() as i32)),
            'E' => {
                self.move_cursor_relative(p1_one() as i32, 0);
                self.cursor.col = 0;
            }
            'F' => {
                self.move_cursor_relative(-(p1_one() as i32), 0);
                self.cursor.col = 0;
            }
            'G' => {
                let col = usize::from(p1().max(1)) - 1;
                self.move_cursor(self.cursor.row, col);
            }
            'H' | 'f' => {
                let row = usize::from(p1().max(1)) - 1;
                let col = usize::from(p2().max(1)) - 1;
                self.move_cursor(row, col);
            }
            'd' => {
                let row = usize::from(p1().max(1)) - 1;
                self.move_cursor(row, self.cursor.col);
            }

            'J' => self.erase_in_display(p1()),
            'K' => self.erase_in_line(p1()),
            'X' => self.erase_chars(p1_one()),
            'P' => self.delete_chars(p1_one()),

            'S' => self.scroll_up(p1_one()),

            's' => self.save_cursor(),
            'u' => self.restore_cursor(),

            'm' | 'h' | 'l' | 'n' | 't' | 'r' => {}

            _ => {
                trace!("unhandled CSI action: '{action}' params={flat:?}");
            }
        }
    }
}

//! ESC dispatch.

use tracing::trace;

use crate::screen::Screen;

impl Screen {
    pub(crate) fn dispatch_esc(&mut self, intermediates: &[u8], byte: u8) {
        match (byte, intermediates) {
            (b'7', _) => self.save_cursor(),
            (b'8', _) => self.restore_cursor(),
            (b'D', _) => self.newline(),
            (b'E', _) => {
                self.carriage_return();
                self.newline();
            }
            (b'M', _) => {
                if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                }
            }
            (b'c', _) => {
                self.erase_in_display(2);
                self.move_cursor(0, 0);
            }
            _ => {
                trace!("unhandled ESC dispatch: byte=0x{byte:02X} intermediates={intermediates:?}");
            }
        }
    }
}

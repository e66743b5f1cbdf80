//! `vte::Perform` implementation for Screen.
//! CSI dispatch is in `csi_dispatch.rs`, ESC dispatch in `esc.rs`.

use tracing::trace;
use vte::{Params, Perform};

use crate::screen::Screen;

impl Perform for Screen {
    fn print(&mut self, c: char) {
        self.put_char(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x08 => self.backspace(),
            0x09 => self.tab(),
            0x0A..=0x0C => self.newline(),
            0x0D => self.carriage_return(),
            _ => {
                trace!("unhandled execute byte: 0x{byte:02X}");
            }
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, action: char) {
        self.dispatch_csi(params, intermediates, action);
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        self.dispatch_esc(intermediates, byte);
    }
}

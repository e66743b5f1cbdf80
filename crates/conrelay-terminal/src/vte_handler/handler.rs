//! SurfaceParser: wraps Screen + vte::Parser.

use crate::screen::{CursorState, RegionChange, Screen};

/// Drives a [`Screen`] from the raw byte stream a PTY produces.
pub struct SurfaceParser {
    screen: Screen,
    parser: vte::Parser,
}

impl SurfaceParser {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            screen: Screen::new(cols, rows),
            parser: vte::Parser::new(),
        }
    }

    /// Feed raw bytes from the PTY into the parser, updating the screen.
    pub fn process(&mut self, bytes: &[u8]) {
        self.parser.advance(&mut self.screen, bytes);
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn cursor(&self) -> &CursorState {
        &self.screen.cursor
    }

    /// Drain the rows changed since the previous call.
    pub fn take_damage(&mut self) -> Vec<RegionChange> {
        self.screen.take_damage()
    }
}

//! Turns "row y changed in [left, right]" notifications into line patches
//! that only ever append to what the receiver already has.

use std::cmp::Ordering;

/// One line patch: `text` belongs at column `x` of logical row `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePatch {
    pub x: usize,
    pub y: usize,
    pub text: String,
}

/// Coalescing state of the current logical page.
///
/// `x_max`/`y_max` mark how far the current page has been sent. `y_adjust`
/// is the row offset of the current page within the whole relayed stream
/// and only grows.
#[derive(Debug, Default, Clone)]
pub struct ScreenDeltaCoalescer {
    x_max: usize,
    y_max: usize,
    y_last: usize,
    y_adjust: usize,
    y_current: usize,
}

impl ScreenDeltaCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the text now shown at screen row `y` starting at column `x`.
    ///
    /// Returns the patch to relay, or `None` when nothing new remains.
    /// Columns and lengths count characters.
    ///
    /// A new row that starts at column `x` counts as sent up to `x` plus the
    /// patch length, not just the patch length, so later text on that row is
    /// cut at the true end of what was relayed and never repeated.
    pub fn apply(&mut self, x: usize, y: usize, text: &str) -> Option<LinePatch> {
        self.y_current = y;

        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            return None;
        }
        let mut patch = trimmed.to_string();
        if trimmed.len() < text.len() {
            // Keep one blank so a later patch on this row cannot glue onto it.
            patch.push(' ');
        }

        let x = match y.cmp(&self.y_max) {
            Ordering::Less => return None,
            Ordering::Greater => {
                self.y_max = y;
                x
            }
            Ordering::Equal => {
                if x < self.x_max {
                    patch = patch.chars().skip(self.x_max - x).collect();
                    if patch.is_empty() {
                        return None;
                    }
                } else if x > self.x_max {
                    patch.insert_str(0, &" ".repeat(x - self.x_max));
                }
                self.x_max
            }
        };
        self.x_max = x + patch.chars().count();
        self.y_last = self.y_last.max(y);

        Some(LinePatch {
            x,
            y: y + self.y_adjust,
            text: patch,
        })
    }

    /// Note the cursor position without relaying anything.
    pub fn observe_cursor(&mut self, y: usize) {
        self.y_current = y;
        self.y_last = self.y_last.max(y);
    }

    /// Start a new logical page after the screen was cleared.
    pub fn begin_page(&mut self) {
        self.y_adjust += self.y_last;
        self.x_max = 0;
        self.y_max = 0;
        self.y_last = 0;
        self.y_current = 0;
    }

    /// Latest screen row touched, relayed or not.
    pub fn y_current(&self) -> usize {
        self.y_current
    }

    pub fn y_last(&self) -> usize {
        self.y_last
    }

    pub fn y_adjust(&self) -> usize {
        self.y_adjust
    }

    pub fn x_max(&self) -> usize {
        self.x_max
    }

    pub fn y_max(&self) -> usize {
        self.y_max
    }
}

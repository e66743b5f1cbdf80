//! Append-style line buffer host: the receiving end of relayed patches for
//! hosts that just want lines of text.

use std::io::Write;

use tracing::warn;

use crate::host::ConsoleHost;

/// Rows of text edited by `(x, y)` replacements.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the characters of row `y` from column `x` on with `text`,
    /// padding with blanks when the row is shorter than `x`.
    pub fn replace(&mut self, x: i32, y: i32, text: &str) {
        let x = usize::try_from(x).unwrap_or(0);
        let y = usize::try_from(y).unwrap_or(0);
        if self.lines.len() <= y {
            self.lines.resize(y + 1, String::new());
        }

        let mut chars: Vec<char> = self.lines[y].chars().collect();
        if chars.len() < x {
            chars.resize(x, ' ');
        }
        let replaced: Vec<char> = text.chars().collect();
        let end = (x + replaced.len()).min(chars.len());
        chars.splice(x..end, replaced);
        self.lines[y] = chars.into_iter().collect();
    }

    pub fn line(&self, y: usize) -> Option<&str> {
        self.lines.get(y).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Host that prints each row once the relay has moved past it, and the
/// remaining rows when the process ends.
pub struct LinePrinter<W> {
    buffer: LineBuffer,
    printed: usize,
    out: W,
}

impl<W: Write> LinePrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            buffer: LineBuffer::new(),
            printed: 0,
            out,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_until(&mut self, end: usize) {
        while self.printed < end.min(self.buffer.len()) {
            let line = self.buffer.line(self.printed).unwrap_or_default();
            if let Err(e) = writeln!(self.out, "{}", line.trim_end()) {
                warn!(error = %e, "failed to print relayed line");
            }
            self.printed += 1;
        }
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> ConsoleHost for LinePrinter<W> {
    fn on_update(&mut self, x: i32, y: i32, text: &str) {
        self.buffer.replace(x, y, text);
        self.print_until(usize::try_from(y).unwrap_or(0));
    }

    fn on_process_ended(&mut self) {
        self.print_until(self.buffer.len());
    }
}

//! Translation of relayed input text into bytes for the PTY.

/// Marker the supervisor side sends for a backspace key press.
pub const BACKSPACE_SEQUENCE: &[u8] = b"\x80kb";

const BS: char = '\u{8}';
const DEL: char = '\u{7f}';

/// Apply backspaces destructively within one chunk of input.
///
/// `BACKSPACE_SEQUENCE` and plain `\b` both erase the preceding character.
/// Backspaces with nothing left to erase are returned as a count so the
/// caller can forward them to the terminal.
pub fn apply_backspaces(raw: &[u8]) -> (usize, String) {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i..].starts_with(BACKSPACE_SEQUENCE) {
            bytes.push(b'\x08');
            i += BACKSPACE_SEQUENCE.len();
        } else {
            bytes.push(raw[i]);
            i += 1;
        }
    }

    let text = String::from_utf8_lossy(&bytes);
    let mut out = String::with_capacity(text.len());
    let mut leading = 0;
    for c in text.chars() {
        if c == BS {
            if out.pop().is_none() {
                leading += 1;
            }
        } else {
            out.push(c);
        }
    }
    (leading, out)
}

/// Encode relayed input as the byte sequence a terminal user would type.
///
/// Unconsumed backspaces become DEL, `\n` becomes `\r`. With `echo` off any
/// other C0 control character is dropped.
pub fn encode_input(raw: &[u8], echo: bool) -> Vec<u8> {
    let (leading, text) = apply_backspaces(raw);
    let mut out = String::with_capacity(leading + text.len());
    out.extend(std::iter::repeat(DEL).take(leading));
    for c in text.chars() {
        match c {
            '\n' => out.push('\r'),
            '\r' | '\t' => out.push(c),
            c if c.is_ascii_control() && c != DEL && !echo => {}
            c => out.push(c),
        }
    }
    out.into_bytes()
}

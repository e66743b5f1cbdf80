use std::borrow::Cow;

/// Record kind tag carried in the first field of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(pub i32);

impl Kind {
    /// A line patch produced by the screen coalescer.
    pub const UPDATE: Kind = Kind(77);
    /// A synthetic status line (process ended, launch failure).
    pub const STATUS: Kind = Kind(88);
    /// Text typed on the supervisor side for the hosted program.
    pub const INPUT: Kind = Kind(73);
}

/// One decoded record.
///
/// `declared_len` is the length the producer meant to send. When the text
/// did not fit the segment it is larger than `text.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: Kind,
    pub x: i32,
    pub y: i32,
    pub declared_len: i32,
    pub text: Vec<u8>,
}

impl Message {
    pub fn new(kind: Kind, x: i32, y: i32, text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        Self {
            kind,
            x,
            y,
            declared_len: i32::try_from(text.len()).unwrap_or(i32::MAX),
            text,
        }
    }

    pub fn update(x: i32, y: i32, text: impl Into<Vec<u8>>) -> Self {
        Self::new(Kind::UPDATE, x, y, text)
    }

    pub fn status(y: i32, text: impl Into<Vec<u8>>) -> Self {
        Self::new(Kind::STATUS, 0, y, text)
    }

    pub fn input(text: impl Into<Vec<u8>>) -> Self {
        Self::new(Kind::INPUT, 0, 0, text)
    }

    /// Bytes of text that actually arrived.
    pub fn delivered_len(&self) -> usize {
        self.text.len()
    }

    /// True when the producer had to cut the text to fit the segment.
    pub fn is_truncated(&self) -> bool {
        usize::try_from(self.declared_len).is_ok_and(|declared| declared > self.text.len())
    }

    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_declared_len() {
        let m = Message::update(3, 7, "abc");
        assert_eq!(m.kind, Kind::UPDATE);
        assert_eq!((m.x, m.y, m.declared_len), (3, 7, 3));
        assert!(!m.is_truncated());

        assert_eq!(Message::status(4, "x").kind, Kind(88));
        assert_eq!(Message::input("ls\n").kind, Kind(73));
    }

    #[test]
    fn truncation_is_visible_through_declared_len() {
        let mut m = Message::update(0, 0, "hello");
        m.declared_len = 50;
        assert!(m.is_truncated());
        assert_eq!(m.delivered_len(), 5);
    }

    #[test]
    fn lossy_text_replaces_invalid_utf8() {
        let m = Message::update(0, 0, vec![b'o', b'k', 0xff]);
        assert_eq!(m.text_lossy(), "ok\u{fffd}");
    }
}

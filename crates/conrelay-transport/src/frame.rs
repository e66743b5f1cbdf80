//! Segment layout and record codec.
//!
//! ```text
//! u32 bytes_in_use | record | record | ...
//! record = i32 kind | i32 x | i32 y | i32 declared_len | text
//! ```
//!
//! All fields are little-endian. `bytes_in_use` counts the header itself, so
//! an empty segment holds `SEGMENT_HEADER_LEN`.

use conrelay_common::TransportError;

use crate::message::{Kind, Message};

pub const SEGMENT_HEADER_LEN: usize = 4;
pub const RECORD_HEADER_LEN: usize = 16;

/// Result of [`try_write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was appended. `truncated` is set when only part of the
    /// text fit.
    Written { bytes_in_use: usize, truncated: bool },
    /// Not even a truncated record fits behind the current contents. The
    /// segment was left untouched.
    Full,
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&buf[at..at + 4]);
    u32::from_le_bytes(word)
}

fn read_i32(buf: &[u8], at: usize) -> i32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&buf[at..at + 4]);
    i32::from_le_bytes(word)
}

fn put_i32(buf: &mut [u8], at: usize, value: i32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Raw `bytes_in_use` header of `buf`.
pub fn bytes_in_use(buf: &[u8]) -> usize {
    if buf.len() < SEGMENT_HEADER_LEN {
        return 0;
    }
    read_u32(buf, 0) as usize
}

fn set_bytes_in_use(buf: &mut [u8], value: usize) {
    buf[..SEGMENT_HEADER_LEN].copy_from_slice(&(value as u32).to_le_bytes());
}

/// Mark the segment empty.
pub fn reset(buf: &mut [u8]) {
    set_bytes_in_use(buf, SEGMENT_HEADER_LEN);
}

/// Append one record to the segment in `buf`.
///
/// A record longer than an empty segment can hold is cut to fit, so the first
/// write into an empty segment always succeeds. Otherwise, if the record does
/// not fit behind the current contents, nothing is written and `Full` is
/// returned.
pub fn try_write(buf: &mut [u8], kind: Kind, x: i32, y: i32, text: &[u8]) -> WriteOutcome {
    let capacity = buf.len();
    let room = capacity.saturating_sub(SEGMENT_HEADER_LEN);
    if room < RECORD_HEADER_LEN {
        return WriteOutcome::Full;
    }
    let in_use = bytes_in_use(buf).max(SEGMENT_HEADER_LEN);

    let record_len = (RECORD_HEADER_LEN + text.len()).min(room);
    if in_use + record_len > capacity {
        return WriteOutcome::Full;
    }
    let text_len = record_len - RECORD_HEADER_LEN;
    let declared = i32::try_from(text.len()).unwrap_or(i32::MAX);

    put_i32(buf, in_use, kind.0);
    put_i32(buf, in_use + 4, x);
    put_i32(buf, in_use + 8, y);
    put_i32(buf, in_use + 12, declared);
    let body = in_use + RECORD_HEADER_LEN;
    buf[body..body + text_len].copy_from_slice(&text[..text_len]);

    // Publish the header last so a reader never sees a half-written record.
    let bytes_in_use = in_use + record_len;
    set_bytes_in_use(buf, bytes_in_use);

    WriteOutcome::Written {
        bytes_in_use,
        truncated: text_len < text.len(),
    }
}

/// Decode every record in the segment, then mark it empty.
///
/// A record whose declared length runs past `bytes_in_use` is delivered with
/// the bytes that are present; that is how truncation shows up. Contents that
/// cannot have been produced by [`try_write`] fail with
/// `TransportError::Corrupt` and the batch is dropped.
pub fn read_all(buf: &mut [u8]) -> Result<Vec<Message>, TransportError> {
    let result = decode(buf);
    reset(buf);
    result
}

fn decode(buf: &[u8]) -> Result<Vec<Message>, TransportError> {
    let capacity = buf.len();
    let in_use = bytes_in_use(buf);
    if in_use == 0 {
        return Ok(Vec::new());
    }
    if in_use > capacity {
        return Err(TransportError::Corrupt(format!(
            "bytes in use {in_use} exceeds capacity {capacity}"
        )));
    }
    if in_use < SEGMENT_HEADER_LEN {
        return Err(TransportError::Corrupt(format!(
            "bytes in use {in_use} is smaller than the segment header"
        )));
    }

    let mut messages = Vec::new();
    let mut offset = SEGMENT_HEADER_LEN;
    while offset < in_use {
        if in_use - offset < RECORD_HEADER_LEN {
            return Err(TransportError::Corrupt(format!(
                "record header at offset {offset} is cut off"
            )));
        }
        let kind = Kind(read_i32(buf, offset));
        let x = read_i32(buf, offset + 4);
        let y = read_i32(buf, offset + 8);
        let declared_len = read_i32(buf, offset + 12);
        let Ok(declared) = usize::try_from(declared_len) else {
            return Err(TransportError::Corrupt(format!(
                "record at offset {offset} has negative length {declared_len}"
            )));
        };

        let body = offset + RECORD_HEADER_LEN;
        let delivered = declared.min(in_use - body);
        messages.push(Message {
            kind,
            x,
            y,
            declared_len,
            text: buf[body..body + delivered].to_vec(),
        });
        offset = body + delivered;
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(capacity: usize) -> Vec<u8> {
        let mut buf = vec![0u8; capacity];
        reset(&mut buf);
        buf
    }

    #[test]
    fn two_lines_in_small_segment_arrive_in_order() {
        let mut buf = segment(64);
        assert_eq!(
            try_write(&mut buf, Kind::UPDATE, 0, 0, b"hello\n"),
            WriteOutcome::Written {
                bytes_in_use: 26,
                truncated: false
            }
        );
        assert_eq!(
            try_write(&mut buf, Kind::UPDATE, 0, 1, b"world\n"),
            WriteOutcome::Written {
                bytes_in_use: 48,
                truncated: false
            }
        );

        let messages = read_all(&mut buf).expect("decode");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, b"hello\n");
        assert_eq!(messages[0].declared_len, 6);
        assert_eq!(messages[1].text, b"world\n");
        assert_eq!(messages[1].y, 1);
        assert_eq!(bytes_in_use(&buf), SEGMENT_HEADER_LEN);
    }

    #[test]
    fn oversized_text_is_truncated_to_an_empty_segment() {
        let mut buf = segment(4096);
        let text: Vec<u8> = (0..5000).map(|i| b'a' + (i % 26) as u8).collect();
        assert_eq!(
            try_write(&mut buf, Kind::UPDATE, 0, 0, &text),
            WriteOutcome::Written {
                bytes_in_use: 4096,
                truncated: true
            }
        );

        let messages = read_all(&mut buf).expect("decode");
        assert_eq!(messages.len(), 1);
        let delivered = 4096 - SEGMENT_HEADER_LEN - RECORD_HEADER_LEN;
        assert_eq!(messages[0].delivered_len(), delivered);
        assert_eq!(messages[0].declared_len, 5000);
        assert_eq!(messages[0].text, &text[..delivered]);
        assert!(messages[0].is_truncated());
    }

    #[test]
    fn full_segment_is_left_untouched() {
        let mut buf = segment(64);
        try_write(&mut buf, Kind::UPDATE, 0, 0, b"0123456789012345678901234567");
        let before = buf.clone();
        assert_eq!(
            try_write(&mut buf, Kind::UPDATE, 0, 1, b"does not fit"),
            WriteOutcome::Full
        );
        assert_eq!(buf, before);
    }

    #[test]
    fn oversized_text_behind_other_records_reports_full() {
        let mut buf = segment(64);
        try_write(&mut buf, Kind::UPDATE, 0, 0, b"x");
        let long = [b'z'; 100];
        assert_eq!(try_write(&mut buf, Kind::UPDATE, 0, 1, &long), WriteOutcome::Full);
    }

    #[test]
    fn zeroed_segment_is_treated_as_empty() {
        let mut buf = vec![0u8; 64];
        assert!(read_all(&mut buf).expect("decode").is_empty());
        assert!(matches!(
            try_write(&mut buf, Kind::INPUT, 0, 0, b"a"),
            WriteOutcome::Written { bytes_in_use: 21, .. }
        ));
    }

    #[test]
    fn header_beyond_capacity_is_corrupt_and_resets() {
        let mut buf = segment(64);
        buf[..4].copy_from_slice(&9000u32.to_le_bytes());
        assert!(matches!(read_all(&mut buf), Err(TransportError::Corrupt(_))));
        assert_eq!(bytes_in_use(&buf), SEGMENT_HEADER_LEN);
    }

    #[test]
    fn cut_off_record_header_is_corrupt() {
        let mut buf = segment(64);
        buf[..4].copy_from_slice(&10u32.to_le_bytes());
        assert!(matches!(read_all(&mut buf), Err(TransportError::Corrupt(_))));
    }

    #[test]
    fn negative_length_is_corrupt() {
        let mut buf = segment(64);
        try_write(&mut buf, Kind::UPDATE, 0, 0, b"abc");
        buf[16..20].copy_from_slice(&(-5i32).to_le_bytes());
        assert!(matches!(read_all(&mut buf), Err(TransportError::Corrupt(_))));
    }

    #[test]
    fn declared_length_past_end_is_clamped() {
        let mut buf = segment(64);
        try_write(&mut buf, Kind::UPDATE, 2, 3, b"abcdef");
        buf[16..20].copy_from_slice(&40i32.to_le_bytes());
        let messages = read_all(&mut buf).expect("decode");
        assert_eq!(messages[0].text, b"abcdef");
        assert_eq!(messages[0].declared_len, 40);
        assert_eq!((messages[0].x, messages[0].y), (2, 3));
    }
}

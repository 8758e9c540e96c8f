//! Line framing for the instrument protocol

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::error::{Error, Result};

/// Byte appended to every outgoing command
pub const END_MARKER: u8 = b'\n';

/// Sequence terminating every instrument reply
pub const TERMINATOR: &[u8] = b"\r\n";

/// Frame a command for the wire
///
/// # Wire Format
///
/// ```text
/// ┌──────────────────┬─────────────┐
/// │   command text   │  end marker │
/// │     N bytes      │  1 byte \n  │
/// └──────────────────┴─────────────┘
/// ```
///
/// Replies travel the other way as `<text>\r\n`.
///
/// # Errors
///
/// Returns an error if the text already contains a line break; commands
/// are single-line by protocol.
///
/// # Examples
///
/// ```
/// use thermolink_core::frame;
///
/// let frame = frame::encode("*IDN?").unwrap();
/// assert_eq!(&frame[..], b"*IDN?\n");
/// ```
pub fn encode(text: &str) -> Result<BytesMut> {
    if text.contains(['\r', '\n']) {
        return Err(Error::InvalidText {
            text: text.to_string(),
        });
    }

    let mut buf = BytesMut::with_capacity(text.len() + 1);
    buf.put_slice(text.as_bytes());
    buf.put_u8(END_MARKER);

    Ok(buf)
}

/// Accumulates reply bytes until the terminator arrives
///
/// Replies can arrive split across reads; feed each chunk to
/// [`push`](Self::push) and the decoded text is returned as soon as the
/// terminator shows up.
///
/// # Examples
///
/// ```
/// use thermolink_core::frame::ReplyAccumulator;
///
/// let mut acc = ReplyAccumulator::new();
/// assert_eq!(acc.push(b"23."), None);
/// assert_eq!(acc.push(b"50\r\n").as_deref(), Some("23.50"));
/// ```
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    buf: BytesMut,
}

impl ReplyAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    /// Append received bytes, returning the reply once terminated
    ///
    /// The terminator is stripped. A reply is a single line; bytes past
    /// the terminator belong to no reply and are dropped. Non-UTF-8 bytes
    /// are decoded lossily.
    pub fn push(&mut self, chunk: &[u8]) -> Option<String> {
        self.buf.extend_from_slice(chunk);

        let pos = self
            .buf
            .windows(TERMINATOR.len())
            .position(|window| window == TERMINATOR)?;

        let text = String::from_utf8_lossy(&self.buf[..pos]).into_owned();

        let extra = self.buf.len() - (pos + TERMINATOR.len());
        if extra > 0 {
            trace!("Dropping {} byte(s) past the terminator", extra);
        }
        self.buf.clear();

        Some(text)
    }

    /// Bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has accumulated
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Give up waiting and take whatever arrived
    ///
    /// Used on timeout; the result may be empty.
    pub fn into_partial(self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_encode_appends_end_marker() {
        let frame = encode("THERMO:TEMP?").unwrap();
        assert_eq!(&frame[..], b"THERMO:TEMP?\n");
    }

    #[test]
    fn test_encode_empty_text() {
        let frame = encode("").unwrap();
        assert_eq!(&frame[..], b"\n");
    }

    #[test]
    fn test_encode_rejects_line_breaks() {
        assert!(matches!(
            encode("ONESHOT\n"),
            Err(Error::InvalidText { .. })
        ));
        assert!(matches!(
            encode("ONE\rSHOT"),
            Err(Error::InvalidText { .. })
        ));
    }

    #[test]
    fn test_accumulator_whole_reply() {
        let mut acc = ReplyAccumulator::new();
        assert_eq!(acc.push(b"23.50\r\n"), Some("23.50".to_string()));
    }

    #[test]
    fn test_accumulator_split_chunks() {
        let mut acc = ReplyAccumulator::new();
        assert_eq!(acc.push(b"RE"), None);
        assert_eq!(acc.push(b"ADY"), None);
        assert_eq!(acc.push(b"\r\n"), Some("READY".to_string()));
    }

    #[test]
    fn test_accumulator_split_terminator() {
        let mut acc = ReplyAccumulator::new();
        assert_eq!(acc.push(b"OK\r"), None);
        assert_eq!(acc.push(b"\n"), Some("OK".to_string()));
    }

    #[test]
    fn test_accumulator_drops_bytes_past_terminator() {
        let mut acc = ReplyAccumulator::new();
        assert_eq!(acc.push(b"25.00\r\nJUNK"), Some("25.00".to_string()));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_accumulator_empty_reply() {
        let mut acc = ReplyAccumulator::new();
        assert_eq!(acc.push(b"\r\n"), Some(String::new()));
    }

    #[test]
    fn test_accumulator_partial() {
        let mut acc = ReplyAccumulator::new();
        acc.push(b"23.");
        assert_eq!(acc.len(), 3);
        assert_eq!(acc.into_partial(), "23.");
    }

    #[test]
    fn test_accumulator_partial_empty() {
        let acc = ReplyAccumulator::new();
        assert_eq!(acc.into_partial(), "");
    }

    #[test]
    fn test_accumulator_lossy_decode() {
        let mut acc = ReplyAccumulator::new();
        let reply = acc.push(&[0x32, 0x33, 0xFF, 0x0D, 0x0A]).unwrap();
        assert_eq!(reply, "23\u{FFFD}");
    }

    proptest! {
        #[test]
        fn test_roundtrip_any_single_line_text(text in "[ -~]*") {
            let frame = encode(&text).unwrap();
            prop_assert_eq!(&frame[..text.len()], text.as_bytes());
            prop_assert_eq!(frame[text.len()], END_MARKER);

            let mut echoed = Vec::from(text.as_bytes());
            echoed.extend_from_slice(TERMINATOR);

            let mut acc = ReplyAccumulator::new();
            prop_assert_eq!(acc.push(&echoed), Some(text.clone()));
        }
    }
}

//! Log record layout.

use crate::error::{CodecError, CodecResult};
use crate::event::{LogEvent, Timestamp};
use bytes::{Buf, BufMut};
use serde::Serialize;
use std::fmt;

/// Size of an encoded record in bytes: time (4) + event (1).
pub const RECORD_SIZE: usize = 5;

/// A single entry in the watchdog log.
///
/// # Format
///
/// ```text
/// | time (u32 LE) | event (u8) |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct LogRecord {
    /// When the event happened.
    pub time: Timestamp,
    /// What happened.
    pub event: LogEvent,
}

impl LogRecord {
    /// The sentinel stored in unused slots.
    pub const EMPTY: Self = Self {
        time: Timestamp::ZERO,
        event: LogEvent::Empty,
    };

    /// Creates a new record.
    #[must_use]
    pub const fn new(event: LogEvent, time: Timestamp) -> Self {
        Self { time, event }
    }

    /// Creates a boot record.
    #[must_use]
    pub const fn boot(time: Timestamp) -> Self {
        Self::new(LogEvent::Boot, time)
    }

    /// Creates a reset record.
    #[must_use]
    pub const fn reset(time: Timestamp) -> Self {
        Self::new(LogEvent::Reset, time)
    }

    /// Returns whether this record marks an unused slot.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.event.is_empty()
    }

    /// Writes the record into `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` has fewer than [`RECORD_SIZE`] bytes of room.
    pub fn put<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.time.as_u32());
        buf.put_u8(self.event.as_byte());
    }

    /// Encodes the record to its fixed-width form.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        self.put(&mut &mut out[..]);
        out
    }

    /// Decodes a record from exactly [`RECORD_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or the event byte is not a
    /// recognized event code.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() != RECORD_SIZE {
            return Err(CodecError::InvalidLength {
                expected: RECORD_SIZE,
                actual: bytes.len(),
            });
        }

        let mut buf = bytes;
        let time = Timestamp::new(buf.get_u32_le());
        let event = LogEvent::try_from(buf.get_u8())?;
        Ok(Self { time, event })
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.event)
    }
}

/// Decodes every whole slot of a region image.
///
/// Trailing bytes that do not fill a slot are ignored.
pub fn decode_slots(image: &[u8]) -> impl Iterator<Item = (usize, CodecResult<LogRecord>)> + '_ {
    image
        .chunks_exact(RECORD_SIZE)
        .enumerate()
        .map(|(slot, chunk)| (slot, LogRecord::decode(chunk)))
}

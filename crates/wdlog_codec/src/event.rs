//! Event codes and timestamps.

use crate::error::{CodecError, CodecResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Kind of event stored in a log record.
///
/// The discriminants are the on-media byte values and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogEvent {
    /// No event. Marks an unused slot.
    #[default]
    Empty = 0,
    /// The device booted.
    Boot = 1,
    /// The watchdog reset the supervised host.
    Reset = 2,
}

impl LogEvent {
    /// All recognized events, in code order.
    pub const ALL: [Self; 3] = [Self::Empty, Self::Boot, Self::Reset];

    /// Converts a byte to an event.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Empty),
            1 => Some(Self::Boot),
            2 => Some(Self::Reset),
            _ => None,
        }
    }

    /// Converts the event to its on-media byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase name of the event.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Boot => "boot",
            Self::Reset => "reset",
        }
    }

    /// Returns true for the sentinel event.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl TryFrom<u8> for LogEvent {
    type Error = CodecError;

    fn try_from(code: u8) -> CodecResult<Self> {
        Self::from_byte(code).ok_or(CodecError::InvalidEvent { code })
    }
}

impl From<LogEvent> for u8 {
    fn from(event: LogEvent) -> Self {
        event.as_byte()
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogEvent {
    type Err = CodecError;

    fn from_str(s: &str) -> CodecResult<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodecError::unknown_event_name(s))
    }
}

/// Wall-clock time of an event, in whole seconds.
///
/// Devices without a real-time clock count from boot instead of the Unix
/// epoch; the log does not distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// The zero timestamp carried by the empty sentinel.
    pub const ZERO: Self = Self(0);

    /// Creates a timestamp from seconds.
    #[must_use]
    pub const fn new(secs: u32) -> Self {
        Self(secs)
    }

    /// Returns the raw seconds value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Current system time, saturating at `u32::MAX`.
    #[must_use]
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(u32::try_from(secs).unwrap_or(u32::MAX))
    }
}

impl From<u32> for Timestamp {
    fn from(secs: u32) -> Self {
        Self(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t:{}", self.0)
    }
}

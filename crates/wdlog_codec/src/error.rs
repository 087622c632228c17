//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The event byte is not one of the recognized event codes.
    #[error("invalid event code: {code:#04x}")]
    InvalidEvent {
        /// The unrecognized byte.
        code: u8,
    },

    /// The event name is not recognized.
    #[error("unknown event name: {name}")]
    UnknownEventName {
        /// The name that failed to parse.
        name: String,
    },

    /// The input is not exactly one record long.
    #[error("invalid record length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}

impl CodecError {
    /// Create an unknown event name error.
    pub fn unknown_event_name(name: impl Into<String>) -> Self {
        Self::UnknownEventName { name: name.into() }
    }
}

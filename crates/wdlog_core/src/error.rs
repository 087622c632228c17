//! Error types for wdlog core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in event log operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] wdlog_storage::StorageError),

    /// Record codec error.
    #[error("codec error: {0}")]
    Codec(#[from] wdlog_codec::CodecError),

    /// The region cannot hold the requested layout.
    #[error("invalid layout: {message}")]
    InvalidLayout {
        /// Description of the problem.
        message: String,
    },

    /// The backend is smaller than the configured region.
    #[error("storage region too small: need {required} bytes, backend has {actual}")]
    RegionTooSmall {
        /// Configured region size.
        required: u64,
        /// Backend size.
        actual: u64,
    },

    /// A slot holds an unrecognized event code.
    #[error("corrupt slot {slot}: invalid event code {code:#04x}")]
    CorruptSlot {
        /// Index of the slot.
        slot: usize,
        /// The byte found in the event position.
        code: u8,
    },

    /// Slot index past the end of the region.
    #[error("slot {slot} out of range (region has {slots} slots)")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of slots in the region.
        slots: usize,
    },

    /// Every slot is used and the wrap policy forbids overwriting.
    #[error("log full: all {slots} slots used")]
    LogFull {
        /// Number of slots in the region.
        slots: usize,
    },

    /// Attempted to append the empty sentinel.
    #[error("cannot append an empty record")]
    EmptyRecord,
}

impl CoreError {
    /// Creates an invalid layout error.
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            message: message.into(),
        }
    }
}

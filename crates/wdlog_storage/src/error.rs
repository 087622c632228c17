//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The access would touch bytes outside the region.
    #[error("access outside storage region: offset {offset}, len {len}, size {size}")]
    OutOfBounds {
        /// The requested offset.
        offset: u64,
        /// The requested length.
        len: usize,
        /// The region size.
        size: u64,
    },

    /// Another process holds the region image.
    #[error("storage locked: another process has exclusive access")]
    Locked,

    /// Refused to create a region image over an existing file.
    #[error("storage image already exists: {0}")]
    AlreadyExists(PathBuf),
}

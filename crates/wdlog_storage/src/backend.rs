//! Storage backend trait definition.

use crate::error::{StorageError, StorageResult};

/// A fixed-size, byte-addressable non-volatile region.
///
/// Backends are **opaque byte stores** modelled on a small EEPROM. They
/// never grow or shrink and do not interpret what is written to them; the
/// record layout belongs to the log on top.
///
/// # Invariants
///
/// - `size` is fixed for the lifetime of the backend
/// - `read_at` returns exactly the bytes last written at that offset
/// - `write_at` overwrites in place and never extends the region
/// - Accesses past `size` fail with [`StorageError::OutOfBounds`]
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - EEPROM emulator for tests
/// - [`super::FileBackend`] - Region image kept in a file
pub trait StorageBackend: Send + Sync {
    /// Returns the size of the region in bytes.
    fn size(&self) -> u64;

    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read would extend past the end of the region
    /// or an I/O error occurs.
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Overwrites bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write would extend past the end of the region
    /// or an I/O error occurs.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Pushes pending writes to the device.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Makes all written data durable.
    ///
    /// Stronger than `flush`: file-backed regions also sync metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}

/// Checks that `offset..offset + len` lies inside a region of `size` bytes.
pub(crate) fn check_bounds(offset: u64, len: usize, size: u64) -> StorageResult<()> {
    let end = offset.checked_add(len as u64);
    match end {
        Some(end) if end <= size => Ok(()),
        _ => Err(StorageError::OutOfBounds { offset, len, size }),
    }
}

//! In-memory EEPROM emulator.

use crate::backend::{check_bounds, StorageBackend};
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::sync::Arc;

/// An in-memory storage region.
///
/// This backend keeps the region in a `Vec` and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Simulating a device before flashing it
///
/// It also counts how many times each byte has been written, which lets
/// tests check how evenly a write policy spreads wear over the region.
///
/// Clones share the same region, so a test can keep a handle while a log
/// owns the backend.
///
/// # Example
///
/// ```rust
/// use wdlog_storage::{StorageBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new(16);
/// backend.write_at(4, b"data").unwrap();
/// assert_eq!(backend.read_at(4, 4).unwrap(), b"data");
/// assert_eq!(backend.size(), 16);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    data: Arc<RwLock<Vec<u8>>>,
    writes: Arc<RwLock<Vec<u32>>>,
}

impl InMemoryBackend {
    /// Creates a zero-filled region of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_fill(size, 0x00)
    }

    /// Creates a region of `size` bytes where every byte is `fill`.
    ///
    /// Use `0xFF` to emulate a factory-fresh EEPROM.
    #[must_use]
    pub fn with_fill(size: usize, fill: u8) -> Self {
        Self::with_data(vec![fill; size])
    }

    /// Creates a region holding pre-existing data.
    ///
    /// Useful for testing recovery scenarios.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        let writes = vec![0; data.len()];
        Self {
            data: Arc::new(RwLock::new(data)),
            writes: Arc::new(RwLock::new(writes)),
        }
    }

    /// Returns a copy of the whole region.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    /// Returns how many times the byte at `offset` has been written.
    #[must_use]
    pub fn write_count(&self, offset: u64) -> u32 {
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.writes.read().get(i).copied())
            .unwrap_or(0)
    }
}

impl StorageBackend for InMemoryBackend {
    fn size(&self) -> u64 {
        self.data.read().len() as u64
    }

    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let data = self.data.read();
        check_bounds(offset, len, data.len() as u64)?;

        let start = offset as usize;
        Ok(data[start..start + len].to_vec())
    }

    fn write_at(&mut self, offset: u64, src: &[u8]) -> StorageResult<()> {
        let mut data = self.data.write();
        check_bounds(offset, src.len(), data.len() as u64)?;

        let start = offset as usize;
        let end = start + src.len();
        data[start..end].copy_from_slice(src);

        let mut writes = self.writes.write();
        for count in &mut writes[start..end] {
            *count = count.saturating_add(1);
        }
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        // Writes land immediately
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        Ok(())
    }
}

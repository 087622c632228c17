//! Slot layout of a storage region.
//!
//! The region is divided into equal slots of one record stride each. Any
//! bytes left over at the end are tail slack and are never written:
//!
//! ```text
//! 0      5      10             capacity   size
//! +------+------+-- ... --+------+--------+
//! | s0   | s1   |         | sN-1 | slack  |
//! +------+------+-- ... --+------+--------+
//! ```

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use wdlog_codec::RECORD_SIZE;

/// Geometry of a region divided into fixed-size record slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionLayout {
    region_size: u64,
    stride: u64,
    capacity: u64,
}

impl RegionLayout {
    /// Computes the layout of a region of `region_size` bytes holding
    /// records of `stride` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stride is zero or the region cannot hold a
    /// single record.
    pub fn new(region_size: u64, stride: usize) -> CoreResult<Self> {
        let stride = stride as u64;
        if stride == 0 {
            return Err(CoreError::invalid_layout("record stride must be non-zero"));
        }
        if region_size < stride {
            return Err(CoreError::invalid_layout(format!(
                "region of {region_size} bytes cannot hold a {stride}-byte record"
            )));
        }

        Ok(Self {
            region_size,
            stride,
            capacity: region_size / stride * stride,
        })
    }

    /// Layout for log records of [`RECORD_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot hold a single record.
    pub fn for_records(region_size: u64) -> CoreResult<Self> {
        Self::new(region_size, RECORD_SIZE)
    }

    /// Total region size in bytes.
    #[must_use]
    pub const fn region_size(&self) -> u64 {
        self.region_size
    }

    /// Record stride in bytes.
    #[must_use]
    pub const fn stride(&self) -> u64 {
        self.stride
    }

    /// Usable bytes: the region size truncated to a multiple of the stride.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of record slots.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        (self.capacity / self.stride) as usize
    }

    /// Bytes at the end of the region that never hold a record.
    #[must_use]
    pub const fn tail_slack(&self) -> u64 {
        self.region_size - self.capacity
    }

    /// Byte offset of slot `slot`.
    #[must_use]
    pub const fn slot_offset(&self, slot: usize) -> u64 {
        slot as u64 * self.stride
    }

    /// Slot index starting at `offset`, if `offset` is slot-aligned and
    /// inside the capacity.
    #[must_use]
    pub const fn slot_of(&self, offset: u64) -> Option<usize> {
        if offset % self.stride == 0 && offset < self.capacity {
            Some((offset / self.stride) as usize)
        } else {
            None
        }
    }

    /// Slot following `slot` in ring order.
    #[must_use]
    pub const fn next_slot(&self, slot: usize) -> usize {
        (slot + 1) % self.slot_count()
    }

    /// Slot preceding `slot` in ring order.
    #[must_use]
    pub const fn prev_slot(&self, slot: usize) -> usize {
        (slot + self.slot_count() - 1) % self.slot_count()
    }
}

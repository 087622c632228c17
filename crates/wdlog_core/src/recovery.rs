//! Cursor recovery by scanning the region.
//!
//! The cursor is never persisted. On open, every slot is decoded and the
//! next write position is derived from which slots are empty:
//!
//! - **Halt**: the first empty slot. If there is none the log is full and
//!   the cursor sits at the end of the region.
//! - **Overwrite**: the first empty slot whose ring predecessor holds a
//!   record. Appends keep the slot after the newest record empty, so after
//!   a wrap this is the only gap. With no such slot the cursor is slot 0,
//!   which covers both a blank region and a region filled to the end
//!   without a gap.
//!
//! Any slot with an unrecognized event byte is fatal; no heuristic repair
//! is attempted.

use crate::config::WrapPolicy;
use crate::error::{CoreError, CoreResult};
use crate::layout::RegionLayout;
use wdlog_codec::{decode_slots, CodecError, LogRecord};
use wdlog_storage::StorageBackend;

/// Result of scanning a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scan {
    /// Slot where the next record goes (`slot_count` when a halted log is full).
    pub cursor_slot: usize,
    /// Number of non-empty slots.
    pub live: usize,
}

/// Reads and decodes every slot of the region.
pub(crate) fn read_slots(
    backend: &dyn StorageBackend,
    layout: &RegionLayout,
) -> CoreResult<Vec<LogRecord>> {
    let image = backend.read_at(0, layout.capacity() as usize)?;
    decode_slots(&image)
        .map(|(slot, result)| match result {
            Ok(record) => Ok(record),
            Err(CodecError::InvalidEvent { code }) => Err(CoreError::CorruptSlot { slot, code }),
            Err(e) => Err(e.into()),
        })
        .collect()
}

/// Derives the cursor from decoded slots.
pub(crate) fn locate_cursor(
    slots: &[LogRecord],
    layout: &RegionLayout,
    policy: WrapPolicy,
) -> Scan {
    let live = slots.iter().filter(|r| !r.is_empty()).count();

    let cursor_slot = match policy {
        WrapPolicy::Halt => slots
            .iter()
            .position(LogRecord::is_empty)
            .unwrap_or(slots.len()),
        WrapPolicy::Overwrite => (0..slots.len())
            .find(|&i| slots[i].is_empty() && !slots[layout.prev_slot(i)].is_empty())
            .unwrap_or(0),
    };

    Scan { cursor_slot, live }
}

/// Scans the region and recovers the cursor.
pub(crate) fn scan(
    backend: &dyn StorageBackend,
    layout: &RegionLayout,
    policy: WrapPolicy,
) -> CoreResult<Scan> {
    let slots = read_slots(backend, layout)?;
    Ok(locate_cursor(&slots, layout, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdlog_codec::Timestamp;
    use wdlog_storage::InMemoryBackend;

    fn layout(slots: usize) -> RegionLayout {
        RegionLayout::for_records((slots * wdlog_codec::RECORD_SIZE) as u64).unwrap()
    }

    fn pattern(occupied: &[bool]) -> Vec<LogRecord> {
        occupied
            .iter()
            .enumerate()
            .map(|(i, &used)| {
                if used {
                    LogRecord::boot(Timestamp::new(i as u32 + 1))
                } else {
                    LogRecord::EMPTY
                }
            })
            .collect()
    }

    #[test]
    fn blank_region_starts_at_zero() {
        let slots = pattern(&[false; 4]);
        for policy in [WrapPolicy::Halt, WrapPolicy::Overwrite] {
            assert_eq!(
                locate_cursor(&slots, &layout(4), policy),
                Scan {
                    cursor_slot: 0,
                    live: 0
                }
            );
        }
    }

    #[test]
    fn partially_filled_region() {
        let slots = pattern(&[true, true, false, false]);
        for policy in [WrapPolicy::Halt, WrapPolicy::Overwrite] {
            let scan = locate_cursor(&slots, &layout(4), policy);
            assert_eq!(scan.cursor_slot, 2);
            assert_eq!(scan.live, 2);
        }
    }

    #[test]
    fn halt_full_region() {
        let slots = pattern(&[true; 4]);
        let scan = locate_cursor(&slots, &layout(4), WrapPolicy::Halt);
        assert_eq!(scan.cursor_slot, 4);
        assert_eq!(scan.live, 4);
    }

    #[test]
    fn overwrite_finds_gap_after_wrap() {
        let slots = pattern(&[true, false, true, true]);
        let scan = locate_cursor(&slots, &layout(4), WrapPolicy::Overwrite);
        assert_eq!(scan.cursor_slot, 1);
        assert_eq!(scan.live, 3);
    }

    #[test]
    fn overwrite_gap_at_slot_zero() {
        let slots = pattern(&[false, true, true, true]);
        let scan = locate_cursor(&slots, &layout(4), WrapPolicy::Overwrite);
        assert_eq!(scan.cursor_slot, 0);
    }

    #[test]
    fn overwrite_interrupted_append_leaves_two_gaps() {
        // Erase-ahead landed, record write did not.
        let slots = pattern(&[true, false, false, true]);
        let scan = locate_cursor(&slots, &layout(4), WrapPolicy::Overwrite);
        assert_eq!(scan.cursor_slot, 1);
    }

    #[test]
    fn overwrite_on_full_region_restarts_at_oldest() {
        let slots = pattern(&[true; 4]);
        let scan = locate_cursor(&slots, &layout(4), WrapPolicy::Overwrite);
        assert_eq!(scan.cursor_slot, 0);
    }

    #[test]
    fn corrupt_slot_is_reported() {
        let mut image = vec![0u8; 20];
        image[9] = 0xFF;
        let backend = InMemoryBackend::with_data(image);

        let result = scan(&backend, &layout(4), WrapPolicy::Overwrite);
        assert!(matches!(
            result,
            Err(CoreError::CorruptSlot { slot: 1, code: 0xFF })
        ));
    }

    #[test]
    fn tail_slack_is_not_scanned() {
        let mut image = vec![0u8; 24];
        image[20..].fill(0xFF);
        let backend = InMemoryBackend::with_data(image);

        let layout = RegionLayout::for_records(24).unwrap();
        let scan = scan(&backend, &layout, WrapPolicy::Halt).unwrap();
        assert_eq!(scan.cursor_slot, 0);
    }
}

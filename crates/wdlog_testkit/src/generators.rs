//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records, append sequences and
//! region sizes that respect the log's invariants.

use proptest::prelude::*;
use wdlog_codec::{LogEvent, LogRecord, Timestamp, RECORD_SIZE};
use wdlog_core::WrapPolicy;

/// Strategy for any recognized event, including the sentinel.
pub fn event_strategy() -> impl Strategy<Value = LogEvent> {
    prop::sample::select(LogEvent::ALL.to_vec())
}

/// Strategy for events that can be appended (not the sentinel).
pub fn appendable_event_strategy() -> impl Strategy<Value = LogEvent> {
    prop_oneof![Just(LogEvent::Boot), Just(LogEvent::Reset)]
}

/// Strategy for records that can be appended.
pub fn record_strategy() -> impl Strategy<Value = LogRecord> {
    (appendable_event_strategy(), any::<u32>())
        .prop_map(|(event, secs)| LogRecord::new(event, Timestamp::new(secs)))
}

/// Strategy for a sequence of appended records.
pub fn record_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<LogRecord>> {
    prop::collection::vec(record_strategy(), 0..max_len)
}

/// Strategy for region sizes holding between `min_slots` and `max_slots`
/// whole slots plus an arbitrary tail.
pub fn region_size_strategy(min_slots: usize, max_slots: usize) -> impl Strategy<Value = u64> {
    (min_slots..=max_slots, 0..RECORD_SIZE)
        .prop_map(|(slots, tail)| (slots * RECORD_SIZE + tail) as u64)
}

/// Strategy for wrap policies.
pub fn wrap_policy_strategy() -> impl Strategy<Value = WrapPolicy> {
    prop_oneof![Just(WrapPolicy::Overwrite), Just(WrapPolicy::Halt)]
}

/// Strategy for arbitrary region images, mostly decodable.
///
/// Event bytes are drawn from the valid codes most of the time so the
/// images exercise recovery rather than only the corruption path.
pub fn region_image_strategy(slots: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        (any::<u32>(), prop_oneof![9 => 0u8..=2, 1 => any::<u8>()]),
        slots,
    )
    .prop_map(|cells| {
        let mut image = Vec::with_capacity(cells.len() * RECORD_SIZE);
        for (secs, code) in cells {
            image.extend_from_slice(&secs.to_le_bytes());
            image.push(code);
        }
        image
    })
}

//! # wdlog Codec
//!
//! Fixed-width record encoding for the watchdog event log.
//!
//! A record is a seconds-resolution timestamp followed by a one-byte event
//! code. The layout is an explicit serialization contract rather than an
//! in-memory struct layout:
//!
//! ```text
//! offset  0       4      5
//!         +-------+------+
//!         | time  | code |
//!         +-------+------+
//!           u32 LE  u8
//! ```
//!
//! The all-zero record is the empty sentinel. Unknown event codes are
//! rejected when decoding, so a [`LogRecord`] always carries a valid event.
//!
//! ## Usage
//!
//! ```
//! use wdlog_codec::{LogEvent, LogRecord, Timestamp, RECORD_SIZE};
//!
//! let record = LogRecord::new(LogEvent::Boot, Timestamp::new(1_700_000_000));
//! let bytes = record.encode();
//! assert_eq!(bytes.len(), RECORD_SIZE);
//!
//! let decoded = LogRecord::decode(&bytes).unwrap();
//! assert_eq!(record, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod event;
mod record;

pub use error::{CodecError, CodecResult};
pub use event::{LogEvent, Timestamp};
pub use record::{decode_slots, LogRecord, RECORD_SIZE};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event_strategy() -> impl Strategy<Value = LogEvent> {
        prop::sample::select(LogEvent::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn roundtrip_any_record(secs in any::<u32>(), event in event_strategy()) {
            let record = LogRecord::new(event, Timestamp::new(secs));
            let decoded = LogRecord::decode(&record.encode()).unwrap();
            prop_assert_eq!(decoded, record);
        }

        #[test]
        fn unknown_codes_never_decode(secs in any::<u32>(), code in 3u8..=u8::MAX) {
            let mut bytes = LogRecord::boot(Timestamp::new(secs)).encode();
            bytes[RECORD_SIZE - 1] = code;
            prop_assert_eq!(
                LogRecord::decode(&bytes),
                Err(CodecError::InvalidEvent { code })
            );
        }
    }
}

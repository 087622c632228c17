//! The event log.

use crate::config::{Config, WrapPolicy};
use crate::error::{CoreError, CoreResult};
use crate::layout::RegionLayout;
use crate::recovery;
use crate::stats::LogStats;
use serde::Serialize;
use tracing::{debug, info, warn};
use wdlog_codec::{CodecError, LogEvent, LogRecord, Timestamp, RECORD_SIZE};
use wdlog_storage::StorageBackend;

/// A record together with the slot it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Slot index in the region.
    pub slot: usize,
    /// The stored record.
    #[serde(flatten)]
    pub record: LogRecord,
}

/// A ring log of watchdog events over a fixed-size storage region.
///
/// `EventLog` owns the region and the write cursor. The cursor is recovered
/// by scanning when the log is opened and reset by [`EventLog::format`];
/// there is no other shared state.
///
/// # Example
///
/// ```rust
/// use wdlog_core::{Config, EventLog};
/// use wdlog_codec::{LogEvent, Timestamp};
/// use wdlog_storage::InMemoryBackend;
///
/// let backend = InMemoryBackend::new(1024);
/// let mut log = EventLog::open(Box::new(backend), Config::default()).unwrap();
///
/// log.record(LogEvent::Boot, Timestamp::new(100)).unwrap();
/// log.record(LogEvent::Reset, Timestamp::new(160)).unwrap();
///
/// let latest = log.latest().unwrap().unwrap();
/// assert_eq!(latest.event, LogEvent::Reset);
/// assert_eq!(log.len(), 2);
/// ```
pub struct EventLog {
    backend: Box<dyn StorageBackend>,
    layout: RegionLayout,
    config: Config,
    /// Slot the next append writes to.
    cursor_slot: usize,
    /// Non-empty slots.
    live: usize,
}

impl EventLog {
    /// Opens a log over an existing region, recovering the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The backend is smaller than `config.region_size`
    /// - The region cannot hold the slots the wrap policy needs
    /// - A slot holds an unrecognized event code and
    ///   `config.format_if_invalid` is not set
    /// - I/O errors occur
    pub fn open(backend: Box<dyn StorageBackend>, config: Config) -> CoreResult<Self> {
        let mut log = Self::attach(backend, config)?;

        match recovery::scan(log.backend.as_ref(), &log.layout, log.config.wrap_policy) {
            Ok(scan) => {
                log.cursor_slot = scan.cursor_slot;
                log.live = scan.live;
            }
            Err(CoreError::CorruptSlot { slot, code }) if log.config.format_if_invalid => {
                warn!(slot, code, "region holds invalid records, formatting");
                log.format()?;
            }
            Err(e) => return Err(e),
        }

        info!(
            slots = log.layout.slot_count(),
            live = log.live,
            cursor = log.cursor_slot,
            policy = %log.config.wrap_policy,
            "opened event log"
        );
        Ok(log)
    }

    /// Formats the region and returns an empty log.
    ///
    /// Whatever the region held before is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid or I/O errors occur.
    pub fn create(backend: Box<dyn StorageBackend>, config: Config) -> CoreResult<Self> {
        let mut log = Self::attach(backend, config)?;
        log.format()?;
        Ok(log)
    }

    fn attach(backend: Box<dyn StorageBackend>, config: Config) -> CoreResult<Self> {
        let layout = config.validate()?;

        let actual = backend.size();
        if actual < config.region_size {
            return Err(CoreError::RegionTooSmall {
                required: config.region_size,
                actual,
            });
        }

        Ok(Self {
            backend,
            layout,
            config,
            cursor_slot: 0,
            live: 0,
        })
    }

    /// Writes the empty sentinel into every slot and resets the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O errors occur.
    pub fn format(&mut self) -> CoreResult<()> {
        let mut image = Vec::with_capacity(self.layout.capacity() as usize);
        for _ in 0..self.layout.slot_count() {
            LogRecord::EMPTY.put(&mut image);
        }

        self.backend.write_at(0, &image)?;
        self.backend.flush()?;
        self.backend.sync()?;

        self.cursor_slot = 0;
        self.live = 0;

        info!(slots = self.layout.slot_count(), "formatted event log");
        Ok(())
    }

    /// Appends a record and returns the slot it was written to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record is the empty sentinel
    /// - The log is full under [`WrapPolicy::Halt`]
    /// - I/O errors occur
    pub fn append(&mut self, record: LogRecord) -> CoreResult<usize> {
        if record.is_empty() {
            return Err(CoreError::EmptyRecord);
        }

        let slot = match self.config.wrap_policy {
            WrapPolicy::Halt => self.append_halting(record)?,
            WrapPolicy::Overwrite => self.append_overwriting(record)?,
        };

        self.backend.flush()?;
        if self.config.sync_on_append {
            self.backend.sync()?;
        }

        debug!(
            slot,
            event = %record.event,
            time = record.time.as_u32(),
            "appended record"
        );
        Ok(slot)
    }

    /// Appends a record built from `event` and `time`.
    ///
    /// # Errors
    ///
    /// See [`EventLog::append`].
    pub fn record(&mut self, event: LogEvent, time: Timestamp) -> CoreResult<usize> {
        self.append(LogRecord::new(event, time))
    }

    fn append_halting(&mut self, record: LogRecord) -> CoreResult<usize> {
        let slot = self.cursor_slot;
        if self.cursor_blocked()? {
            return Err(CoreError::LogFull {
                slots: self.layout.slot_count(),
            });
        }

        self.write_slot(slot, &record)?;
        self.cursor_slot = slot + 1;
        self.live += 1;
        Ok(slot)
    }

    fn append_overwriting(&mut self, record: LogRecord) -> CoreResult<usize> {
        let slot = self.cursor_slot;
        let next = self.layout.next_slot(slot);

        let next_used = !self.read_slot(next)?.is_empty();
        // Only a region filled without a gap has a record at the cursor.
        let slot_used = !self.read_slot(slot)?.is_empty();

        // Clear the head marker before writing the record, so an interrupted
        // append leaves a gap that recovery still resolves to `slot`.
        // `live` only follows writes that landed.
        self.write_slot(next, &LogRecord::EMPTY)?;
        if next_used {
            self.live -= 1;
        }

        self.write_slot(slot, &record)?;
        if !slot_used {
            self.live += 1;
        }

        self.cursor_slot = next;
        Ok(slot)
    }

    /// Whether the halting cursor points past the region or at a stored
    /// record.
    fn cursor_blocked(&self) -> CoreResult<bool> {
        let slot = self.cursor_slot;
        Ok(slot >= self.layout.slot_count() || !self.read_slot(slot)?.is_empty())
    }

    fn write_slot(&mut self, slot: usize, record: &LogRecord) -> CoreResult<()> {
        let offset = self.layout.slot_offset(slot);
        self.backend.write_at(offset, &record.encode())?;
        Ok(())
    }

    /// Reads the record stored in `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is out of range, holds an invalid event
    /// code, or I/O errors occur.
    pub fn read_slot(&self, slot: usize) -> CoreResult<LogRecord> {
        let slots = self.layout.slot_count();
        if slot >= slots {
            return Err(CoreError::SlotOutOfRange { slot, slots });
        }

        let bytes = self
            .backend
            .read_at(self.layout.slot_offset(slot), RECORD_SIZE)?;
        LogRecord::decode(&bytes).map_err(|e| match e {
            CodecError::InvalidEvent { code } => CoreError::CorruptSlot { slot, code },
            other => other.into(),
        })
    }

    /// Returns the most recent record, or `None` if the log is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or decoded.
    pub fn latest(&self) -> CoreResult<Option<LogRecord>> {
        let head = self.cursor_slot % self.layout.slot_count();
        let record = self.read_slot(self.layout.prev_slot(head))?;
        Ok((!record.is_empty()).then_some(record))
    }

    /// Returns all stored records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read or decoded.
    pub fn records(&self) -> CoreResult<Vec<LogEntry>> {
        let slots = recovery::read_slots(self.backend.as_ref(), &self.layout)?;
        let count = slots.len();
        let start = self.cursor_slot % count;

        Ok((0..count)
            .map(|i| (start + i) % count)
            .filter(|&slot| !slots[slot].is_empty())
            .map(|slot| LogEntry {
                slot,
                record: slots[slot],
            })
            .collect())
    }

    /// Returns up to `n` of the newest records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read or decoded.
    pub fn recent(&self, n: usize) -> CoreResult<Vec<LogEntry>> {
        let mut entries = self.records()?;
        entries.reverse();
        entries.truncate(n);
        Ok(entries)
    }

    /// Computes a summary of the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read or decoded.
    pub fn stats(&self) -> CoreResult<LogStats> {
        let mut stats = LogStats {
            region_size: self.layout.region_size(),
            capacity: self.layout.capacity(),
            slots: self.layout.slot_count(),
            max_live: self.max_live(),
            live: 0,
            boots: 0,
            resets: 0,
            cursor_slot: self.cursor_slot,
            wrap_policy: self.config.wrap_policy,
            oldest: None,
            newest: None,
        };
        stats.tally(&self.records()?);
        Ok(stats)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns whether no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns whether a halting log refuses the next append.
    ///
    /// That is the case at the end of the region, or when the cursor has
    /// run into a record left by an earlier wrap. An overwriting log is
    /// never full.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot at the cursor cannot be read or decoded.
    pub fn is_full(&self) -> CoreResult<bool> {
        match self.config.wrap_policy {
            WrapPolicy::Halt => self.cursor_blocked(),
            WrapPolicy::Overwrite => Ok(false),
        }
    }

    /// Most records the log can hold at once.
    #[must_use]
    pub fn max_live(&self) -> usize {
        match self.config.wrap_policy {
            WrapPolicy::Halt => self.layout.slot_count(),
            WrapPolicy::Overwrite => self.layout.slot_count() - 1,
        }
    }

    /// Byte offset of the write cursor.
    #[must_use]
    pub fn cursor(&self) -> u64 {
        self.layout.slot_offset(self.cursor_slot)
    }

    /// Slot index of the write cursor.
    #[must_use]
    pub fn cursor_slot(&self) -> usize {
        self.cursor_slot
    }

    /// Returns the region layout.
    #[must_use]
    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Returns the configuration the log was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Syncs the region to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    pub fn sync(&mut self) -> CoreResult<()> {
        self.backend.flush()?;
        self.backend.sync()?;
        Ok(())
    }

    /// Releases the storage region.
    #[must_use]
    pub fn into_backend(self) -> Box<dyn StorageBackend> {
        self.backend
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("layout", &self.layout)
            .field("config", &self.config)
            .field("cursor_slot", &self.cursor_slot)
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wdlog_storage::{InMemoryBackend, StorageError, StorageResult};

    /// Memory backend that fails writes once its write budget runs out.
    #[derive(Clone)]
    struct FailingBackend {
        inner: InMemoryBackend,
        budget: Arc<AtomicUsize>,
    }

    impl FailingBackend {
        fn new(size: usize) -> Self {
            Self {
                inner: InMemoryBackend::new(size),
                budget: Arc::new(AtomicUsize::new(usize::MAX)),
            }
        }

        fn allow_writes(&self, n: usize) {
            self.budget.store(n, Ordering::SeqCst);
        }
    }

    impl StorageBackend for FailingBackend {
        fn size(&self) -> u64 {
            self.inner.size()
        }

        fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
            self.inner.read_at(offset, len)
        }

        fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
            let left = self.budget.load(Ordering::SeqCst);
            if left == 0 {
                return Err(StorageError::Io(std::io::Error::other("write failed")));
            }
            if left != usize::MAX {
                self.budget.store(left - 1, Ordering::SeqCst);
            }
            self.inner.write_at(offset, data)
        }

        fn flush(&mut self) -> StorageResult<()> {
            Ok(())
        }

        fn sync(&mut self) -> StorageResult<()> {
            Ok(())
        }
    }

    fn failing_log(size: u64) -> (EventLog, FailingBackend) {
        let backend = FailingBackend::new(size as usize);
        let config = Config::new().region_size(size).sync_on_append(false);
        let log = EventLog::open(Box::new(backend.clone()), config).unwrap();
        (log, backend)
    }

    fn times(log: &EventLog) -> Vec<u32> {
        log.records()
            .unwrap()
            .iter()
            .map(|e| e.record.time.as_u32())
            .collect()
    }

    fn overwrite_log(size: u64) -> EventLog {
        let config = Config::new().region_size(size).sync_on_append(false);
        EventLog::open(Box::new(InMemoryBackend::new(size as usize)), config).unwrap()
    }

    fn halt_log(size: u64) -> EventLog {
        let config = Config::new()
            .region_size(size)
            .wrap_policy(WrapPolicy::Halt)
            .sync_on_append(false);
        EventLog::open(Box::new(InMemoryBackend::new(size as usize)), config).unwrap()
    }

    fn ts(secs: u32) -> Timestamp {
        Timestamp::new(secs)
    }

    #[test]
    fn new_log_is_empty() {
        let log = overwrite_log(1024);
        assert!(log.is_empty());
        assert_eq!(log.cursor(), 0);
        assert_eq!(log.latest().unwrap(), None);
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn append_advances_cursor_by_stride() {
        let mut log = overwrite_log(1024);
        assert_eq!(log.record(LogEvent::Boot, ts(1)).unwrap(), 0);
        assert_eq!(log.cursor(), 5);
        assert_eq!(log.record(LogEvent::Reset, ts(2)).unwrap(), 1);
        assert_eq!(log.cursor(), 10);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn append_rejects_empty_record() {
        let mut log = overwrite_log(1024);
        assert!(matches!(
            log.append(LogRecord::EMPTY),
            Err(CoreError::EmptyRecord)
        ));
        assert!(matches!(
            log.record(LogEvent::Empty, ts(9)),
            Err(CoreError::EmptyRecord)
        ));
        assert_eq!(log.cursor(), 0);
    }

    #[test]
    fn latest_returns_newest() {
        let mut log = overwrite_log(1024);
        log.record(LogEvent::Boot, ts(10)).unwrap();
        log.record(LogEvent::Reset, ts(20)).unwrap();

        assert_eq!(log.latest().unwrap(), Some(LogRecord::reset(ts(20))));
    }

    #[test]
    fn halt_accepts_every_slot_then_rejects() {
        let mut log = halt_log(1024);
        for i in 0..204 {
            assert_eq!(log.record(LogEvent::Boot, ts(i)).unwrap(), i as usize);
        }
        assert!(log.is_full().unwrap());
        assert_eq!(log.len(), 204);
        assert_eq!(log.cursor(), 1020);

        let result = log.record(LogEvent::Reset, ts(999));
        assert!(matches!(result, Err(CoreError::LogFull { slots: 204 })));
        assert_eq!(log.latest().unwrap(), Some(LogRecord::boot(ts(203))));
    }

    #[test]
    fn overwrite_wraps_record_205_to_slot_zero() {
        let mut log = overwrite_log(1024);
        for i in 1..=204 {
            log.record(LogEvent::Boot, ts(i)).unwrap();
        }
        assert_eq!(log.len(), 203);
        assert_eq!(log.read_slot(0).unwrap(), LogRecord::EMPTY);

        assert_eq!(log.record(LogEvent::Reset, ts(205)).unwrap(), 0);
        assert_eq!(log.read_slot(1).unwrap(), LogRecord::EMPTY);
        assert_eq!(log.len(), 203);
        assert!(!log.is_full().unwrap());

        let records = log.records().unwrap();
        assert_eq!(records.first().unwrap().record, LogRecord::boot(ts(3)));
        assert_eq!(records.last().unwrap().record, LogRecord::reset(ts(205)));
    }

    #[test]
    fn records_are_oldest_first_after_wrap() {
        let mut log = overwrite_log(20);
        for i in 1..=6 {
            log.record(LogEvent::Boot, ts(i)).unwrap();
        }

        let times: Vec<u32> = log
            .records()
            .unwrap()
            .iter()
            .map(|e| e.record.time.as_u32())
            .collect();
        assert_eq!(times, vec![4, 5, 6]);
    }

    #[test]
    fn recent_is_newest_first() {
        let mut log = overwrite_log(1024);
        for i in 1..=5 {
            log.record(LogEvent::Boot, ts(i)).unwrap();
        }

        let recent = log.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].record.time, ts(5));
        assert_eq!(recent[1].record.time, ts(4));
        assert_eq!(log.recent(100).unwrap().len(), 5);
    }

    #[test]
    fn reopen_recovers_cursor() {
        let config = Config::new().region_size(20).sync_on_append(false);
        let mut log =
            EventLog::open(Box::new(InMemoryBackend::new(20)), config.clone()).unwrap();
        for i in 1..=5 {
            log.record(LogEvent::Reset, ts(i)).unwrap();
        }
        let cursor = log.cursor_slot();
        let before = log.records().unwrap();

        let reopened = EventLog::open(log.into_backend(), config).unwrap();
        assert_eq!(reopened.cursor_slot(), cursor);
        assert_eq!(reopened.records().unwrap(), before);
        assert_eq!(reopened.len(), 3);
    }

    #[test]
    fn format_resets_cursor_and_clears_slots() {
        let mut log = overwrite_log(1024);
        log.record(LogEvent::Boot, ts(1)).unwrap();
        log.record(LogEvent::Reset, ts(2)).unwrap();

        log.format().unwrap();
        assert_eq!(log.cursor(), 0);
        assert!(log.is_empty());
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn read_slot_out_of_range() {
        let log = overwrite_log(1024);
        assert!(matches!(
            log.read_slot(204),
            Err(CoreError::SlotOutOfRange {
                slot: 204,
                slots: 204
            })
        ));
    }

    #[test]
    fn open_rejects_small_backend() {
        let config = Config::new().region_size(1024);
        let result = EventLog::open(Box::new(InMemoryBackend::new(512)), config);
        assert!(matches!(
            result,
            Err(CoreError::RegionTooSmall {
                required: 1024,
                actual: 512
            })
        ));
    }

    #[test]
    fn overwrite_needs_two_slots() {
        let config = Config::new().region_size(5);
        let result = EventLog::open(Box::new(InMemoryBackend::new(5)), config);
        assert!(matches!(result, Err(CoreError::InvalidLayout { .. })));

        let halt = Config::new().region_size(5).wrap_policy(WrapPolicy::Halt);
        let mut log = EventLog::open(Box::new(InMemoryBackend::new(5)), halt).unwrap();
        log.record(LogEvent::Boot, ts(1)).unwrap();
        assert!(log.is_full().unwrap());
    }

    #[test]
    fn factory_fresh_region_fails_to_open() {
        let backend = InMemoryBackend::with_fill(1024, 0xFF);
        let result = EventLog::open(Box::new(backend), Config::default());
        assert!(matches!(
            result,
            Err(CoreError::CorruptSlot { slot: 0, code: 0xFF })
        ));
    }

    #[test]
    fn factory_fresh_region_formats_when_allowed() {
        let backend = InMemoryBackend::with_fill(1024, 0xFF);
        let config = Config::default().format_if_invalid(true);
        let log = EventLog::open(Box::new(backend), config).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.read_slot(203).unwrap(), LogRecord::EMPTY);
    }

    #[test]
    fn create_discards_previous_contents() {
        let mut log = overwrite_log(64);
        log.record(LogEvent::Boot, ts(1)).unwrap();

        let log = EventLog::create(log.into_backend(), Config::new().region_size(64)).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn writes_never_touch_tail_slack() {
        let mut image = vec![0u8; 1024];
        image[1020..].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let config = Config::new().sync_on_append(false);
        let mut log = EventLog::create(Box::new(InMemoryBackend::with_data(image)), config).unwrap();

        for i in 0..500 {
            log.record(LogEvent::Boot, ts(i)).unwrap();
        }

        let tail = log.into_backend().read_at(1020, 4).unwrap();
        assert_eq!(tail, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn halt_image_reopened_with_overwrite_replaces_oldest() {
        let mut log = halt_log(20);
        for i in 1..=4 {
            log.record(LogEvent::Boot, ts(i)).unwrap();
        }

        let mut log = EventLog::open(log.into_backend(), Config::new().region_size(20)).unwrap();
        assert_eq!(log.cursor_slot(), 0);
        assert_eq!(log.latest().unwrap(), Some(LogRecord::boot(ts(4))));

        log.record(LogEvent::Reset, ts(5)).unwrap();
        let times: Vec<u32> = log
            .records()
            .unwrap()
            .iter()
            .map(|e| e.record.time.as_u32())
            .collect();
        assert_eq!(times, vec![3, 4, 5]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn stats_counts_events() {
        let mut log = overwrite_log(1024);
        log.record(LogEvent::Boot, ts(1)).unwrap();
        log.record(LogEvent::Reset, ts(2)).unwrap();
        log.record(LogEvent::Reset, ts(3)).unwrap();

        let stats = log.stats().unwrap();
        assert_eq!(stats.slots, 204);
        assert_eq!(stats.capacity, 1020);
        assert_eq!(stats.max_live, 203);
        assert_eq!(stats.live, 3);
        assert_eq!(stats.boots, 1);
        assert_eq!(stats.resets, 2);
        assert_eq!(stats.cursor_slot, 3);
        assert_eq!(stats.oldest, Some(LogRecord::boot(ts(1))));
        assert_eq!(stats.newest, Some(LogRecord::reset(ts(3))));
    }

    #[test]
    fn failed_writes_leave_len_unchanged() {
        let (mut log, backend) = failing_log(15);
        log.record(LogEvent::Boot, ts(1)).unwrap();
        log.record(LogEvent::Boot, ts(2)).unwrap();

        backend.allow_writes(0);
        for i in 3..8 {
            let result = log.record(LogEvent::Reset, ts(i));
            assert!(matches!(result, Err(CoreError::Storage(_))));
            assert_eq!(log.len(), 2);
            assert_eq!(log.cursor_slot(), 2);
        }

        backend.allow_writes(usize::MAX);
        assert_eq!(log.record(LogEvent::Reset, ts(3)).unwrap(), 2);
        assert_eq!(times(&log), vec![2, 3]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn failed_record_write_after_erase_is_counted() {
        let (mut log, backend) = failing_log(15);
        log.record(LogEvent::Boot, ts(1)).unwrap();
        log.record(LogEvent::Boot, ts(2)).unwrap();

        // The erase ahead lands, the record write does not.
        backend.allow_writes(1);
        assert!(log.record(LogEvent::Reset, ts(3)).is_err());
        assert_eq!(log.len(), 1);
        assert_eq!(log.len(), log.records().unwrap().len());
        assert_eq!(log.cursor_slot(), 2);

        backend.allow_writes(usize::MAX);
        log.record(LogEvent::Reset, ts(3)).unwrap();
        assert_eq!(times(&log), vec![2, 3]);
        assert_eq!(log.len(), 2);

        let reopened = EventLog::open(log.into_backend(), Config::new().region_size(15)).unwrap();
        assert_eq!(times(&reopened), vec![2, 3]);
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn halt_is_full_when_cursor_reaches_a_stored_record() {
        // A wrapped overwrite image: records in slots 0, 2 and 3.
        let mut image = Vec::new();
        LogRecord::boot(ts(4)).put(&mut image);
        LogRecord::EMPTY.put(&mut image);
        LogRecord::boot(ts(2)).put(&mut image);
        LogRecord::boot(ts(3)).put(&mut image);

        let config = Config::new()
            .region_size(20)
            .wrap_policy(WrapPolicy::Halt)
            .sync_on_append(false);
        let mut log = EventLog::open(Box::new(InMemoryBackend::with_data(image)), config).unwrap();
        assert_eq!(log.cursor_slot(), 1);
        assert!(!log.is_full().unwrap());

        log.record(LogEvent::Reset, ts(5)).unwrap();
        assert_eq!(log.cursor_slot(), 2);
        assert!(log.is_full().unwrap());
        assert!(matches!(
            log.record(LogEvent::Reset, ts(6)),
            Err(CoreError::LogFull { slots: 4 })
        ));
    }

    #[test]
    fn overwrite_is_never_full() {
        let mut log = overwrite_log(15);
        for i in 1..=10 {
            log.record(LogEvent::Boot, ts(i)).unwrap();
            assert!(!log.is_full().unwrap());
        }
    }
}

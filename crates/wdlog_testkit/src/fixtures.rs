//! Test fixtures and log helpers.
//!
//! Provides convenience functions for setting up logs over in-memory and
//! file-backed regions.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wdlog_codec::{LogRecord, RECORD_SIZE};
use wdlog_core::{Config, EventLog, WrapPolicy};
use wdlog_storage::{FileBackend, InMemoryBackend};

/// A test log with automatic cleanup of any backing file.
pub struct TestLog {
    /// The log instance.
    pub log: EventLog,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestLog {
    /// Creates a log over a zeroed in-memory region.
    pub fn memory(region_size: u64, policy: WrapPolicy) -> Self {
        let backend = InMemoryBackend::new(region_size as usize);
        Self {
            log: EventLog::open(Box::new(backend), test_config(region_size, policy))
                .expect("Failed to open in-memory log"),
            temp_dir: None,
        }
    }

    /// Creates a log over a fresh image file in a temporary directory.
    pub fn file(region_size: u64, policy: WrapPolicy) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = image_path(temp_dir.path());
        let backend = FileBackend::create(&path, region_size).expect("Failed to create image");

        Self {
            log: EventLog::create(Box::new(backend), test_config(region_size, policy))
                .expect("Failed to create file log"),
            temp_dir: Some(temp_dir),
        }
    }

    /// Returns the image path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|d| image_path(d.path()))
    }

    /// Closes the log and opens the same region again.
    pub fn reopen(self) -> Self {
        let config = self.log.config().clone();
        match self.temp_dir {
            Some(temp_dir) => {
                drop(self.log);
                let backend =
                    FileBackend::open(&image_path(temp_dir.path())).expect("Failed to reopen image");
                Self {
                    log: EventLog::open(Box::new(backend), config).expect("Failed to reopen log"),
                    temp_dir: Some(temp_dir),
                }
            }
            None => Self {
                log: EventLog::open(self.log.into_backend(), config)
                    .expect("Failed to reopen log"),
                temp_dir: None,
            },
        }
    }
}

impl std::ops::Deref for TestLog {
    type Target = EventLog;

    fn deref(&self) -> &Self::Target {
        &self.log
    }
}

impl std::ops::DerefMut for TestLog {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.log
    }
}

/// Configuration used by fixtures: no per-append sync.
pub fn test_config(region_size: u64, policy: WrapPolicy) -> Config {
    Config::new()
        .region_size(region_size)
        .wrap_policy(policy)
        .sync_on_append(false)
}

/// Runs a test with a temporary in-memory log of the reference size.
///
/// # Example
///
/// ```rust
/// use wdlog_testkit::with_temp_log;
/// use wdlog_codec::{LogEvent, Timestamp};
///
/// with_temp_log(|log| {
///     log.record(LogEvent::Boot, Timestamp::new(1)).unwrap();
///     assert_eq!(log.len(), 1);
/// });
/// ```
pub fn with_temp_log<F, R>(f: F) -> R
where
    F: FnOnce(&mut EventLog) -> R,
{
    let mut test_log = TestLog::memory(wdlog_core::DEFAULT_REGION_SIZE, WrapPolicy::Overwrite);
    f(&mut test_log.log)
}

/// Builds a region image with the given records in slots `0..records.len()`
/// and empty slots up to `slots`.
pub fn image_with_records(records: &[LogRecord], slots: usize) -> Vec<u8> {
    assert!(records.len() <= slots, "more records than slots");

    let mut image = Vec::with_capacity(slots * RECORD_SIZE);
    for record in records {
        record.put(&mut image);
    }
    for _ in records.len()..slots {
        LogRecord::EMPTY.put(&mut image);
    }
    image
}

fn image_path(dir: &Path) -> PathBuf {
    dir.join("eeprom.bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdlog_codec::{LogEvent, Timestamp};

    #[test]
    fn memory_fixture_starts_empty() {
        let log = TestLog::memory(1024, WrapPolicy::Halt);
        assert!(log.is_empty());
        assert!(log.path().is_none());
    }

    #[test]
    fn file_fixture_survives_reopen() {
        let mut log = TestLog::file(64, WrapPolicy::Overwrite);
        log.record(LogEvent::Boot, Timestamp::new(5)).unwrap();
        assert!(log.path().unwrap().exists());

        let log = log.reopen();
        assert_eq!(log.latest().unwrap(), Some(LogRecord::boot(Timestamp::new(5))));
    }

    #[test]
    fn image_builder_pads_with_sentinels() {
        let image = image_with_records(&[LogRecord::reset(Timestamp::new(1))], 3);
        assert_eq!(image.len(), 15);
        assert_eq!(&image[5..], &[0u8; 10]);
    }

    #[test]
    fn with_temp_log_runs_closure() {
        let len = with_temp_log(|log| {
            log.record(LogEvent::Reset, Timestamp::new(3)).unwrap();
            log.len()
        });
        assert_eq!(len, 1);
    }
}

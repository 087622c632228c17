//! Log statistics.

use crate::config::WrapPolicy;
use crate::event_log::LogEntry;
use serde::Serialize;
use wdlog_codec::{LogEvent, LogRecord};

/// Summary of an event log's layout and contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogStats {
    /// Region size in bytes.
    pub region_size: u64,
    /// Usable bytes (whole slots only).
    pub capacity: u64,
    /// Number of slots.
    pub slots: usize,
    /// Most records the log can hold at once under its policy.
    pub max_live: usize,
    /// Records currently stored.
    pub live: usize,
    /// Boot events stored.
    pub boots: usize,
    /// Reset events stored.
    pub resets: usize,
    /// Slot the next append goes to.
    pub cursor_slot: usize,
    /// Wrap policy in effect.
    pub wrap_policy: WrapPolicy,
    /// Oldest stored record.
    pub oldest: Option<LogRecord>,
    /// Newest stored record.
    pub newest: Option<LogRecord>,
}

impl LogStats {
    pub(crate) fn tally(&mut self, entries: &[LogEntry]) {
        self.live = entries.len();
        self.boots = count(entries, LogEvent::Boot);
        self.resets = count(entries, LogEvent::Reset);
        self.oldest = entries.first().map(|e| e.record);
        self.newest = entries.last().map(|e| e.record);
    }
}

fn count(entries: &[LogEntry], event: LogEvent) -> usize {
    entries.iter().filter(|e| e.record.event == event).count()
}

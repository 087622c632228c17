//! Dump and latest command implementations.

use std::path::Path;
use wdlog_core::{CoreResult, EventLog, LogEntry, WrapPolicy};

/// Runs the dump command.
pub fn run(
    path: &Path,
    limit: Option<usize>,
    format: &str,
    policy: WrapPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_log(path, policy)?;

    let mut entries = log.records()?;
    if let Some(limit) = limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            print_text_output(&entries);
        }
    }

    Ok(())
}

/// Runs the latest command.
pub fn run_latest(
    path: &Path,
    format: &str,
    policy: WrapPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_log(path, policy)?;
    let latest = latest_entry(&log)?;

    match (format, latest) {
        ("json", latest) => {
            println!("{}", serde_json::to_string_pretty(&latest)?);
        }
        (_, Some(entry)) => {
            println!("{}", format_entry(&entry));
        }
        (_, None) => {
            println!("Log is empty");
        }
    }

    Ok(())
}

/// The newest record with the slot it sits in, just behind the cursor.
fn latest_entry(log: &EventLog) -> CoreResult<Option<LogEntry>> {
    let layout = log.layout();
    let slot = layout.prev_slot(log.cursor_slot() % layout.slot_count());
    Ok(log.latest()?.map(|record| LogEntry { slot, record }))
}

fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{:>5}  {:>10}  {}",
        entry.slot,
        entry.record.time.as_u32(),
        entry.record.event
    )
}

fn print_text_output(entries: &[LogEntry]) {
    println!("{:>5}  {:>10}  EVENT", "SLOT", "TIME");
    println!("{}", "-".repeat(28));

    for entry in entries {
        println!("{}", format_entry(entry));
    }

    println!();
    println!("Total: {} records", entries.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdlog_codec::{LogEvent, LogRecord, Timestamp};
    use wdlog_core::Config;
    use wdlog_storage::InMemoryBackend;

    fn memory_log(size: u64, policy: WrapPolicy) -> EventLog {
        let config = Config::new()
            .region_size(size)
            .wrap_policy(policy)
            .sync_on_append(false);
        EventLog::open(Box::new(InMemoryBackend::new(size as usize)), config).unwrap()
    }

    #[test]
    fn latest_entry_of_empty_log() {
        let log = memory_log(15, WrapPolicy::Overwrite);
        assert_eq!(latest_entry(&log).unwrap(), None);
    }

    #[test]
    fn latest_entry_after_wrap() {
        let mut log = memory_log(15, WrapPolicy::Overwrite);
        for i in 1..=4 {
            log.record(LogEvent::Boot, Timestamp::new(i)).unwrap();
        }

        let entry = latest_entry(&log).unwrap().unwrap();
        assert_eq!(entry.slot, 0);
        assert_eq!(entry.record, LogRecord::boot(Timestamp::new(4)));
        assert_eq!(Some(entry), log.recent(1).unwrap().pop());
    }

    #[test]
    fn latest_entry_of_full_halted_log() {
        let mut log = memory_log(15, WrapPolicy::Halt);
        for i in 1..=3 {
            log.record(LogEvent::Reset, Timestamp::new(i)).unwrap();
        }

        let entry = latest_entry(&log).unwrap().unwrap();
        assert_eq!(entry.slot, 2);
        assert_eq!(entry.record, LogRecord::reset(Timestamp::new(3)));
    }

    #[test]
    fn entry_columns() {
        let entry = LogEntry {
            slot: 7,
            record: LogRecord::reset(Timestamp::new(1234)),
        };
        assert_eq!(format_entry(&entry), "    7        1234  reset");
    }

    #[test]
    fn entry_json_is_flat() {
        let entry = LogEntry {
            slot: 3,
            record: LogRecord::boot(Timestamp::new(99)),
        };
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "slot": 3, "time": 99, "event": "boot" })
        );
    }
}

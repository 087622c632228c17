//! Append command implementation.

use std::path::Path;
use wdlog_codec::{LogEvent, LogRecord, Timestamp};
use wdlog_core::WrapPolicy;

/// Runs the append command.
pub fn run(
    path: &Path,
    event: LogEvent,
    time: Option<u32>,
    policy: WrapPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut log = super::open_log(path, policy)?;

    let time = time.map_or_else(Timestamp::now, Timestamp::new);
    let record = LogRecord::new(event, time);
    let slot = log.append(record)?;

    println!("Appended {} at slot {} ({} records)", record, slot, log.len());
    Ok(())
}

//! Init and wipe command implementations.

use std::path::Path;
use tracing::info;
use wdlog_core::{Config, EventLog, WrapPolicy};
use wdlog_storage::{FileBackend, StorageBackend};

/// Runs the init command.
pub fn run(
    path: &Path,
    size: u64,
    force: bool,
    policy: WrapPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    // Reject an unusable size before touching the filesystem.
    let config = Config::new().region_size(size).wrap_policy(policy);
    config.validate()?;

    if force && path.exists() {
        info!("Replacing existing image {:?}", path);
        std::fs::remove_file(path)?;
    }

    let backend = FileBackend::create_with_dirs(path, size)?;
    let log = EventLog::create(Box::new(backend), config)?;

    let layout = log.layout();
    println!(
        "Created {:?}: {} bytes, {} slots of {} bytes, {} bytes unused",
        path,
        layout.region_size(),
        layout.slot_count(),
        layout.stride(),
        layout.tail_slack()
    );
    Ok(())
}

/// Runs the wipe command.
pub fn run_wipe(path: &Path, policy: WrapPolicy) -> Result<(), Box<dyn std::error::Error>> {
    info!("Wiping image {:?}", path);

    if !path.exists() {
        return Err(format!("No image found at {:?}", path).into());
    }

    // Open without decoding so a corrupt image can still be wiped.
    let backend = FileBackend::open(path)?;
    let config = Config::new()
        .region_size(backend.size())
        .wrap_policy(policy);
    let log = EventLog::create(Box::new(backend), config)?;

    println!("Wiped {} slots", log.layout().slot_count());
    Ok(())
}

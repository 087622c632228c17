//! CLI command implementations.

pub mod append;
pub mod dump;
pub mod init;
pub mod inspect;
pub mod verify;

use std::path::Path;
use wdlog_core::{Config, EventLog, WrapPolicy};
use wdlog_storage::{FileBackend, StorageBackend};

/// Opens the log stored in an image. The whole file is the region.
pub(crate) fn open_log(
    path: &Path,
    policy: WrapPolicy,
) -> Result<EventLog, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No image found at {:?}", path).into());
    }

    let backend = FileBackend::open(path)?;
    let config = Config::new()
        .region_size(backend.size())
        .wrap_policy(policy);
    Ok(EventLog::open(Box::new(backend), config)?)
}

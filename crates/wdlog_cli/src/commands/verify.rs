//! Verify command implementation.

use std::path::Path;
use wdlog_codec::{decode_slots, RECORD_SIZE};
use wdlog_storage::{FileBackend, StorageBackend};

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Number of slots checked.
    pub slots_checked: usize,
    /// Number of slots holding a record.
    pub used_slots: usize,
    /// Number of empty slots.
    pub empty_slots: usize,
    /// List of errors found.
    pub errors: Vec<String>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the verify command.
///
/// Reads the image directly so every corrupt slot is reported, not just
/// the first one.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying image at {:?}", path);
    println!();

    let backend = FileBackend::open(path)?;
    let result = verify_region(&backend)?;

    println!("  Slots checked: {}", result.slots_checked);
    println!("  Used:          {}", result.used_slots);
    println!("  Empty:         {}", result.empty_slots);
    for error in &result.errors {
        println!("  ✗ {}", error);
    }

    println!();
    if result.is_ok() {
        println!("✓ Image verification passed");
        Ok(())
    } else {
        println!("✗ Image verification failed");
        Err("Verification failed".into())
    }
}

fn verify_region(backend: &dyn StorageBackend) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let slots = backend.size() as usize / RECORD_SIZE;
    let image = backend.read_at(0, slots * RECORD_SIZE)?;

    let mut result = VerifyResult::default();
    for (slot, decoded) in decode_slots(&image) {
        result.slots_checked += 1;
        match decoded {
            Ok(record) if record.is_empty() => result.empty_slots += 1,
            Ok(_) => result.used_slots += 1,
            Err(e) => result.errors.push(format!("slot {}: {}", slot, e)),
        }
    }

    Ok(result)
}

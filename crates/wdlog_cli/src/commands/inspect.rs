//! Inspect command implementation.

use serde::Serialize;
use std::path::Path;
use wdlog_core::{LogStats, WrapPolicy};

/// Image inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Image path.
    pub path: String,
    /// Record stride in bytes.
    pub stride: u64,
    /// Bytes past the last whole slot.
    pub tail_slack: u64,
    /// Byte offset of the write cursor.
    pub cursor: u64,
    /// Log statistics.
    #[serde(flatten)]
    pub stats: LogStats,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str, policy: WrapPolicy) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_log(path, policy)?;
    let layout = log.layout();

    let result = InspectResult {
        path: path.display().to_string(),
        stride: layout.stride(),
        tail_slack: layout.tail_slack(),
        cursor: log.cursor(),
        stats: log.stats()?,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    let stats = &result.stats;

    println!("Image: {}", result.path);
    println!();
    println!("Layout:");
    println!("  Region size:  {} bytes", stats.region_size);
    println!("  Capacity:     {} bytes", stats.capacity);
    println!("  Stride:       {} bytes", result.stride);
    println!("  Slots:        {}", stats.slots);
    println!("  Unused tail:  {} bytes", result.tail_slack);
    println!();
    println!("Log:");
    println!("  Policy:       {}", stats.wrap_policy);
    println!("  Records:      {} / {}", stats.live, stats.max_live);
    println!("  Boots:        {}", stats.boots);
    println!("  Resets:       {}", stats.resets);
    println!(
        "  Cursor:       slot {} (offset {})",
        stats.cursor_slot, result.cursor
    );

    if let Some(oldest) = stats.oldest {
        println!("  Oldest:       {}", oldest);
    }
    if let Some(newest) = stats.newest {
        println!("  Newest:       {}", newest);
    }
}

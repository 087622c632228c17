//! # wdlog Core
//!
//! Ring log of watchdog events over a small non-volatile region.
//!
//! This crate provides:
//! - Slot layout of a fixed-size region ([`RegionLayout`])
//! - The event log with append, scan and cursor recovery ([`EventLog`])
//! - Wrap policies for a full region ([`WrapPolicy`])
//! - Log configuration ([`Config`])
//!
//! The region is divided into 5-byte slots; the bytes past the last whole
//! slot are never written. The write cursor lives in the [`EventLog`] value
//! and is recovered by scanning when a region is opened.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod event_log;
mod layout;
mod recovery;
mod stats;

pub use config::{Config, WrapPolicy, DEFAULT_REGION_SIZE};
pub use error::{CoreError, CoreResult};
pub use event_log::{EventLog, LogEntry};
pub use layout::RegionLayout;
pub use stats::LogStats;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

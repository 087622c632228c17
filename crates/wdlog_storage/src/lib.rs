//! # wdlog Storage
//!
//! Storage region trait and implementations for the watchdog event log.
//!
//! A region is a small, fixed-size, byte-addressable non-volatile store,
//! typically an EEPROM of about a kilobyte. Backends are **opaque byte
//! stores** - they do not interpret the data they hold.
//!
//! ## Design Principles
//!
//! - Backends have a fixed size and are overwritten in place
//! - No knowledge of the log record layout or the write cursor
//! - Must be `Send + Sync` so the owning log can move between threads
//! - Out-of-range accesses are rejected, never wrapped
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - EEPROM emulator for testing
//! - [`FileBackend`] - Region image stored in a file
//!
//! ## Example
//!
//! ```rust
//! use wdlog_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new(1024);
//! backend.write_at(0, b"hello").unwrap();
//! assert_eq!(backend.read_at(0, 5).unwrap(), b"hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;

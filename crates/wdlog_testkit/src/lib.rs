//! # wdlog Testkit
//!
//! Test utilities for wdlog.
//!
//! This crate provides:
//! - Test fixtures for in-memory and file-backed logs
//! - Property-based test generators using proptest
//! - Record encoding test vectors shared with device firmware
//!
//! ## Usage
//!
//! ```rust
//! use wdlog_testkit::prelude::*;
//! use wdlog_core::WrapPolicy;
//!
//! let log = TestLog::memory(1024, WrapPolicy::Halt);
//! assert_eq!(log.layout().slot_count(), 204);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;

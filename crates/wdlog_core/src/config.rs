//! Event log configuration.

use crate::error::{CoreError, CoreResult};
use crate::layout::RegionLayout;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Region size of the reference device (a 1 KiB EEPROM).
pub const DEFAULT_REGION_SIZE: u64 = 1024;

/// What happens when an append reaches the end of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapPolicy {
    /// Wrap around and overwrite the oldest record.
    ///
    /// The slot after the newest record is always kept empty, so one slot
    /// of the region is reserved as the head marker.
    #[default]
    Overwrite,
    /// Refuse further appends once every slot is used.
    Halt,
}

impl WrapPolicy {
    /// Returns the lowercase name of the policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Halt => "halt",
        }
    }
}

impl fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "halt" => Ok(Self::Halt),
            other => Err(format!("unknown wrap policy: {other}")),
        }
    }
}

/// Configuration for opening an event log.
#[derive(Debug, Clone)]
pub struct Config {
    /// Size of the storage region in bytes.
    ///
    /// Only the first `region_size` bytes of the backend are used.
    pub region_size: u64,

    /// Behaviour once the region is full.
    pub wrap_policy: WrapPolicy,

    /// Whether to sync the backend after every append (safer but slower).
    pub sync_on_append: bool,

    /// Whether to format a region containing undecodable slots instead of
    /// failing to open.
    pub format_if_invalid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region_size: DEFAULT_REGION_SIZE,
            wrap_policy: WrapPolicy::Overwrite,
            sync_on_append: true,
            format_if_invalid: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the region size.
    #[must_use]
    pub const fn region_size(mut self, size: u64) -> Self {
        self.region_size = size;
        self
    }

    /// Sets the wrap policy.
    #[must_use]
    pub const fn wrap_policy(mut self, policy: WrapPolicy) -> Self {
        self.wrap_policy = policy;
        self
    }

    /// Sets whether to sync after every append.
    #[must_use]
    pub const fn sync_on_append(mut self, value: bool) -> Self {
        self.sync_on_append = value;
        self
    }

    /// Sets whether to format a region that fails to decode.
    #[must_use]
    pub const fn format_if_invalid(mut self, value: bool) -> Self {
        self.format_if_invalid = value;
        self
    }

    /// Validates the configuration and returns the slot layout it implies.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLayout` if the region cannot hold a record, or holds
    /// fewer than two slots under [`WrapPolicy::Overwrite`].
    pub fn validate(&self) -> CoreResult<RegionLayout> {
        let layout = RegionLayout::for_records(self.region_size)?;

        // Overwrite reserves one slot as the head marker.
        if self.wrap_policy == WrapPolicy::Overwrite && layout.slot_count() < 2 {
            return Err(CoreError::invalid_layout(
                "overwrite policy needs at least two slots",
            ));
        }
        Ok(layout)
    }
}

//! Configuration type definitions for checkcache.
//!
//! # Example Configuration
//!
//! ```toml
//! cache_dir = "/var/tmp/checkcache"
//!
//! [check]
//! expire = 600
//! interval = 60
//! timeout = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults;

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckCacheConfig {
    /// Directory holding every cache file.
    /// Default: the platform cache directory joined with `checkcache`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Default thresholds for checks
    #[serde(default)]
    pub check: CheckConfig,
}

/// Default thresholds applied when the command line does not set them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckConfig {
    /// Seconds a cached result stays trustworthy.
    /// Default: 600 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<i64>,

    /// Minimum seconds between two refreshes.
    /// Default: 60 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,

    /// Hard execution limit for the wrapped command.
    /// Default: 120 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl CheckConfig {
    pub fn expire(&self) -> i64 {
        self.expire.unwrap_or(defaults::DEFAULT_EXPIRE_SECS)
    }

    pub fn interval(&self) -> i64 {
        self.interval.unwrap_or(defaults::DEFAULT_INTERVAL_SECS)
    }

    pub fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(defaults::DEFAULT_TIMEOUT_SECS)
    }
}

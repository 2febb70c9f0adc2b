//! Default values for configuration.

use std::path::PathBuf;

pub const DEFAULT_EXPIRE_SECS: i64 = 600;

pub const DEFAULT_INTERVAL_SECS: i64 = 60;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "CHECKCACHE_CACHE_DIR";

/// Returns the default cache directory.
///
/// Uses the platform cache directory (`~/.cache/checkcache` on Linux) and
/// falls back to the system temp directory when there is none, e.g. for
/// system users without a home.
pub fn default_cache_dir() -> PathBuf {
    match dirs::cache_dir() {
        Some(cache) => cache.join("checkcache"),
        None => {
            tracing::warn!(
                event = "core.config.cache_dir_fallback",
                message = "Could not find a platform cache directory, using the temp directory"
            );
            std::env::temp_dir().join("checkcache")
        }
    }
}

/// Directory holding the user config file.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".checkcache"))
}

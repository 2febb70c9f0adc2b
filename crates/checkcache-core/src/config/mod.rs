//! # Configuration System
//!
//! Hierarchical TOML configuration for checkcache.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.checkcache/config.toml`
//! 3. **Environment** - `CHECKCACHE_CACHE_DIR` overrides the cache directory
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.checkcache/config.toml
//! cache_dir = "/var/tmp/checkcache"
//!
//! [check]
//! expire = 600
//! interval = 60
//! timeout = 120
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use checkcache_core::config::CheckCacheConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CheckCacheConfig::load_hierarchy()?;
//!     let cache_path = config.cache_path_for(Some("disk"), "check_disk -w 10%")?;
//!     println!("{}", cache_path.display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::PathBuf;

// Public API exports
pub use loading::{cache_file_name, resolve_cache_dir};
pub use types::{CheckCacheConfig, CheckConfig};
pub use validation::validate_config;

impl CheckCacheConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Cache file for a check, named explicitly or derived from its command.
    pub fn cache_path_for(
        &self,
        name: Option<&str>,
        command: &str,
    ) -> Result<PathBuf, crate::errors::ConfigError> {
        let cache_dir = resolve_cache_dir(self)?;
        let file_name = match name {
            Some(name) => cache_file_name(name),
            None => cache_file_name(command),
        };
        Ok(cache_dir.join(file_name))
    }
}

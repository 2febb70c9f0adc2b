//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.checkcache/config.toml`
//! 3. **Environment** - `CHECKCACHE_CACHE_DIR`
//! 4. **CLI arguments** - Command-line flags (highest priority, applied by the CLI)

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::{self, CACHE_DIR_ENV};
use crate::config::types::{CheckCacheConfig, CheckConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Load configuration from the hierarchy of config sources.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if
/// validation fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<CheckCacheConfig, ConfigError> {
    let user_config_path = defaults::config_dir().map(|dir| dir.join("config.toml"));
    let env_cache_dir = std::env::var_os(CACHE_DIR_ENV).map(PathBuf::from);
    load_hierarchy_from(user_config_path.as_deref(), env_cache_dir)
}

/// [`load_hierarchy`] with explicit sources.
pub fn load_hierarchy_from(
    user_config_path: Option<&Path>,
    env_cache_dir: Option<PathBuf>,
) -> Result<CheckCacheConfig, ConfigError> {
    let mut config = CheckCacheConfig::default();

    if let Some(path) = user_config_path
        && let Some(user_config) = load_config_file(path)?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(cache_dir) = env_cache_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        tracing::debug!(
            event = "core.config.env_override_applied",
            variable = CACHE_DIR_ENV,
            cache_dir = %cache_dir.display()
        );
        config.cache_dir = Some(cache_dir);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file, `Ok(None)` when it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<CheckCacheConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Merge two configurations, with override_config taking precedence.
///
/// Override values replace base values only if present.
pub fn merge_configs(base: CheckCacheConfig, override_config: CheckCacheConfig) -> CheckCacheConfig {
    CheckCacheConfig {
        cache_dir: override_config.cache_dir.or(base.cache_dir),
        check: CheckConfig {
            expire: override_config.check.expire.or(base.check.expire),
            interval: override_config.check.interval.or(base.check.interval),
            timeout: override_config.check.timeout.or(base.check.timeout),
        },
    }
}

/// The absolute cache directory.
///
/// Relative paths are resolved against the current directory here, because
/// the detached refresh runs from `/`.
pub fn resolve_cache_dir(config: &CheckCacheConfig) -> Result<PathBuf, ConfigError> {
    let cache_dir = config
        .cache_dir
        .clone()
        .unwrap_or_else(defaults::default_cache_dir);

    if cache_dir.is_absolute() {
        return Ok(cache_dir);
    }

    let cwd = std::env::current_dir().map_err(|e| ConfigError::CacheDirUnavailable {
        message: format!(
            "cannot resolve relative cache_dir '{}': {}",
            cache_dir.display(),
            e
        ),
    })?;
    Ok(cwd.join(cache_dir))
}

/// File name for a check's cache.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`, and `.json` is
/// appended unless already present.
pub fn cache_file_name(key: &str) -> String {
    let mut name: String = key
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Keep the file inside the cache directory.
    if name.is_empty() || name.chars().all(|c| c == '.') {
        name = name.replace('.', "_");
        name.push('_');
    }

    if !name.ends_with(".json") {
        name.push_str(".json");
    }
    name
}

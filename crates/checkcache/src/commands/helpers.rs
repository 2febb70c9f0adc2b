use std::path::PathBuf;

use clap::ArgMatches;
use tracing::error;

use checkcache_core::CheckCacheConfig;
use checkcache_core::errors::ConfigError;

/// Load the config hierarchy, logging failures.
pub fn load_config() -> Result<CheckCacheConfig, ConfigError> {
    CheckCacheConfig::load_hierarchy().map_err(|e| {
        error!(event = "cli.config.load_failed", error = %e);
        e
    })
}

/// The `--command` value, if given.
pub fn command_arg(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("command").map(String::as_str)
}

/// Cache file for the check selected by `--name` / `--command`.
pub fn cache_path(config: &CheckCacheConfig, matches: &ArgMatches) -> Result<PathBuf, ConfigError> {
    let name = matches.get_one::<String>("name").map(String::as_str);
    let command = command_arg(matches).unwrap_or_default();
    config.cache_path_for(name, command)
}

/// Timeout from `--timeout`, else from config.
pub fn timeout(config: &CheckCacheConfig, matches: &ArgMatches) -> u64 {
    matches
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or_else(|| config.check.timeout())
}

/// Throttle interval from `--interval`, else from config.
///
/// Negative values (`-i -1`) mean "refresh whenever allowed" and clamp to 0.
pub fn interval(config: &CheckCacheConfig, matches: &ArgMatches) -> i64 {
    matches
        .get_one::<i64>("interval")
        .copied()
        .unwrap_or_else(|| config.check.interval())
        .max(0)
}

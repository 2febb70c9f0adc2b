//! Cache file persistence
//!
//! Reading never fails: a missing, unreadable or malformed cache file is
//! simply "no record yet". Writing reports success as a boolean and goes
//! through a temp file plus rename, so a failed write leaves the previous
//! content in place.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::types::CacheRecord;

/// Load/save access to cache records keyed by file path.
pub trait RecordStore {
    /// Returns `None` when there is no usable record at `path`.
    fn load(&self, path: &Path) -> Option<CacheRecord>;

    /// Persist `record` at `path`, creating the parent directory if needed.
    fn save(&self, path: &Path, record: &CacheRecord) -> bool;
}

/// JSON files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl RecordStore for FileStore {
    fn load(&self, path: &Path) -> Option<CacheRecord> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    event = "core.cache.load_missing",
                    file = %path.display()
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.cache.load_read_error",
                    file = %path.display(),
                    error = %e,
                    message = "Failed to read cache file, treating as absent"
                );
                return None;
            }
        };

        match serde_json::from_str::<CacheRecord>(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    event = "core.cache.load_invalid_json",
                    file = %path.display(),
                    error = %e,
                    message = "Failed to parse cache JSON, treating as absent"
                );
                None
            }
        }
    }

    fn save(&self, path: &Path, record: &CacheRecord) -> bool {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && !parent.is_dir()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::error!(
                event = "core.cache.create_dir_failed",
                dir = %parent.display(),
                error = %e,
                message = "Failed to create cache directory"
            );
            return false;
        }

        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(
                    event = "core.cache.serialization_failed",
                    file = %path.display(),
                    error = %e,
                    message = "Failed to serialize cache record to JSON"
                );
                return false;
            }
        };

        let temp_file = temp_path_for(path);

        if let Err(e) = fs::write(&temp_file, &json) {
            log_write_failure(path, &e);
            cleanup_temp_file(&temp_file, &e);
            return false;
        }

        if let Err(e) = fs::rename(&temp_file, path) {
            log_write_failure(path, &e);
            cleanup_temp_file(&temp_file, &e);
            return false;
        }

        tracing::debug!(
            event = "core.cache.save_completed",
            file = %path.display(),
            refresh_launched = record.refresh_launched
        );
        true
    }
}

/// Sibling temp file, unique per process so concurrent polls never share one.
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cache".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}

fn log_write_failure(path: &Path, error: &std::io::Error) {
    tracing::error!(
        event = "core.cache.write_failed",
        file = %path.display(),
        error = %error,
        message = "Failed to write cache file"
    );
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if !temp_file.exists() {
        return;
    }
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.cache.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after write error"
        );
    }
}

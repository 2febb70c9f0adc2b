//! Production entry points: the check engine wired to the real filesystem,
//! shell, fork-based detacher and system clock.

use std::path::Path;

use tracing::info;

use crate::cache::{CacheRecord, FileStore, RecordStore};
use crate::check::clock::SystemClock;
use crate::check::decision;
use crate::check::errors::CheckError;
use crate::check::refresh::Refresher;
use crate::check::types::{Decision, RefreshOutcome};
use crate::process::{ForkDetacher, ShellRunner, StayAttached};

/// Decide what to report for the cache file at `cache_path`.
pub fn check_cache(cache_path: &Path, expire: i64, interval: i64) -> Decision {
    info!(
        event = "core.check.decide_started",
        file = %cache_path.display(),
        expire = expire,
        interval = interval
    );
    decision::decide(&FileStore, &SystemClock, cache_path, expire, interval)
}

/// Refresh in a detached background process.
///
/// The calling process exits with `parent_exit_code` once the in-flight
/// marker is written; this function only returns in the detached child,
/// or in the caller when detaching failed.
pub fn refresh_detached(
    command: &str,
    timeout: u64,
    cache_path: &Path,
    parent_exit_code: i32,
) -> Result<RefreshOutcome, CheckError> {
    validate_refresh_args(command, timeout)?;
    Refresher::new(FileStore, ShellRunner::new(), ForkDetacher, SystemClock).refresh(
        command,
        timeout,
        cache_path,
        parent_exit_code,
    )
}

/// Refresh in the calling process, blocking until the command finishes.
pub fn refresh_attached(
    command: &str,
    timeout: u64,
    cache_path: &Path,
) -> Result<RefreshOutcome, CheckError> {
    validate_refresh_args(command, timeout)?;
    Refresher::new(FileStore, ShellRunner::new(), StayAttached, SystemClock).refresh(
        command,
        timeout,
        cache_path,
        0,
    )
}

/// The record currently stored at `cache_path`, if any.
pub fn read_cache(cache_path: &Path) -> Option<CacheRecord> {
    FileStore.load(cache_path)
}

fn validate_refresh_args(command: &str, timeout: u64) -> Result<(), CheckError> {
    if command.trim().is_empty() {
        return Err(CheckError::EmptyCommand);
    }
    if timeout == 0 {
        return Err(CheckError::InvalidTimeout);
    }
    Ok(())
}

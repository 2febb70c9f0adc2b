//! Decision engine: what to report for this poll.
//!
//! Evaluated in order:
//! 1. No record: bootstrap an empty placeholder. `UNKNOWN` + refresh when
//!    it was written, `CRITICAL` without refresh when it was not.
//! 2. Expired record: `CRITICAL` + refresh.
//! 3. Refresh in flight: serve the cached result, never start another refresh.
//! 4. Settled record: serve the cached result, refresh once the throttle
//!    interval has elapsed. Return codes outside the plugin range are
//!    reported as `UNKNOWN`.

use std::path::Path;

use tracing::{info, warn};

use crate::cache::{
    CacheRecord, CheckStatus, RecordStore, cache_is_expired, runcmd_interval_respected,
};
use crate::check::clock::Clock;
use crate::check::types::Decision;

pub fn decide(
    store: &impl RecordStore,
    clock: &impl Clock,
    cache_path: &Path,
    expire: i64,
    interval: i64,
) -> Decision {
    let now = clock.now();

    let Some(record) = store.load(cache_path) else {
        return bootstrap(store, cache_path);
    };

    if cache_is_expired(&record, expire, now) {
        let message = match record.last_check {
            Some(last_check) => format!(
                "Cached result expired: last check {:.0}s ago (expire after {}s)",
                now - last_check,
                expire
            ),
            None if record.refresh_launched => {
                "No completed check in cache, refresh in progress".to_string()
            }
            None => "No completed check in cache".to_string(),
        };
        warn!(
            event = "core.check.cache_expired",
            file = %cache_path.display(),
            refresh_launched = record.refresh_launched
        );
        return Decision::new(CheckStatus::Critical, message, true);
    }

    if record.refresh_launched {
        info!(
            event = "core.check.refresh_in_flight",
            file = %cache_path.display()
        );
        return serve_cached(&record, false);
    }

    let should_refresh = runcmd_interval_respected(&record, interval, now);
    info!(
        event = "core.check.cache_served",
        file = %cache_path.display(),
        should_refresh = should_refresh
    );
    serve_cached(&record, should_refresh)
}

fn bootstrap(store: &impl RecordStore, cache_path: &Path) -> Decision {
    if store.save(cache_path, &CacheRecord::default()) {
        info!(
            event = "core.check.cache_bootstrapped",
            file = %cache_path.display()
        );
        Decision::new(
            CheckStatus::Unknown,
            "No cached result yet, check launched in background",
            true,
        )
    } else {
        Decision::new(
            CheckStatus::Critical,
            format!("Unable to write cache file {}", cache_path.display()),
            false,
        )
    }
}

// Recognized codes are served as the live status, unrecognized ones as
// UNKNOWN; see "Open question decisions" in DESIGN.md.
fn serve_cached(record: &CacheRecord, should_refresh: bool) -> Decision {
    match record.cached_status() {
        Some(status) => Decision::new(status, record.cached_message(), should_refresh),
        None => {
            let code = record
                .return_code
                .map_or_else(|| "missing".to_string(), |code| code.to_string());
            Decision::new(
                CheckStatus::Unknown,
                format!(
                    "Unexpected return code {} in cache: {}",
                    code,
                    record.cached_message()
                ),
                should_refresh,
            )
        }
    }
}

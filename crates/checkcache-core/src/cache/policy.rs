//! Staleness policy.
//!
//! Both predicates treat a record without `last_check` as the most
//! conservative case: the throttle interval is respected and the cache is
//! expired, so a record that never completed a run always permits action.

use crate::cache::types::CacheRecord;

/// Seconds elapsed since the record's last completed run, if it has one.
fn elapsed_since_last_check(record: &CacheRecord, now: f64) -> Option<f64> {
    record.last_check.map(|last_check| now - last_check)
}

/// True when at least `interval` seconds passed since `last_check`.
pub fn runcmd_interval_respected(record: &CacheRecord, interval: i64, now: f64) -> bool {
    match elapsed_since_last_check(record, now) {
        Some(elapsed) => elapsed >= interval as f64,
        None => true,
    }
}

/// True when more than `expire` seconds passed since `last_check`.
pub fn cache_is_expired(record: &CacheRecord, expire: i64, now: f64) -> bool {
    match elapsed_since_last_check(record, now) {
        Some(elapsed) => elapsed > expire as f64,
        None => true,
    }
}

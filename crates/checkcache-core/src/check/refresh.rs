//! Refresh orchestration: mark, detach, run, persist.
//!
//! Every cache write here is best-effort. A lost in-flight marker does not
//! stop the run; a lost final write leaves the previous record in place and
//! the next poll simply sees it as before.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::cache::{CacheRecord, RecordStore};
use crate::check::clock::Clock;
use crate::check::errors::CheckError;
use crate::check::types::RefreshOutcome;
use crate::process::{CommandRunner, Detacher};

/// The capabilities a refresh needs.
#[derive(Debug, Clone, Default)]
pub struct Refresher<S, R, D, C> {
    pub store: S,
    pub runner: R,
    pub detacher: D,
    pub clock: C,
}

impl<S, R, D, C> Refresher<S, R, D, C>
where
    S: RecordStore,
    R: CommandRunner,
    D: Detacher,
    C: Clock,
{
    pub fn new(store: S, runner: R, detacher: D, clock: C) -> Self {
        Self {
            store,
            runner,
            detacher,
            clock,
        }
    }

    /// Re-run `command` and persist its result at `cache_path`.
    ///
    /// With a detaching [`Detacher`] the calling process exits with
    /// `parent_exit_code` during this call, and everything after the mark
    /// step runs in the detached child.
    pub fn refresh(
        &self,
        command: &str,
        timeout: u64,
        cache_path: &Path,
        parent_exit_code: i32,
    ) -> Result<RefreshOutcome, CheckError> {
        info!(
            event = "core.refresh.started",
            command = command,
            file = %cache_path.display()
        );

        self.mark_in_flight(command, timeout, cache_path);

        self.detacher.detach(parent_exit_code).map_err(|e| {
            error!(
                event = "core.refresh.detach_failed",
                file = %cache_path.display(),
                error = %e
            );
            e
        })?;

        let started = self.clock.now();
        let outcome = self
            .runner
            .run(command, Duration::from_secs(timeout))
            .map_err(|e| {
                error!(
                    event = "core.refresh.run_failed",
                    command = command,
                    error = %e
                );
                e
            })?;
        let finished = self.clock.now();

        let record = CacheRecord::settled(command, timeout, outcome, started, finished);
        let persisted = self.store.save(cache_path, &record);

        if persisted {
            info!(
                event = "core.refresh.completed",
                file = %cache_path.display(),
                return_code = ?record.return_code,
                runtime_secs = ?record.last_runtime
            );
        } else {
            warn!(
                event = "core.refresh.result_not_persisted",
                file = %cache_path.display(),
                message = "Refresh result could not be written, previous record stays in place"
            );
        }

        Ok(RefreshOutcome { record, persisted })
    }

    /// Flag the record as refreshing. A missing record gets a full
    /// provisional one, an existing record is replaced by the bare marker.
    fn mark_in_flight(&self, command: &str, timeout: u64, cache_path: &Path) {
        let marker = match self.store.load(cache_path) {
            Some(_) => CacheRecord::marker(),
            None => CacheRecord::provisional(command, timeout, self.clock.now()),
        };

        if !self.store.save(cache_path, &marker) {
            warn!(
                event = "core.refresh.mark_failed",
                file = %cache_path.display(),
                message = "Could not mark refresh as in flight, running the command anyway"
            );
        }
    }
}

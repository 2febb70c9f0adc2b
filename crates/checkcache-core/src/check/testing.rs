//! Test doubles for the check capabilities.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::{CacheRecord, RecordStore};
use crate::check::Clock;
use crate::process::{CommandOutcome, CommandRunner, Detacher, ProcessError};

/// Hands out the queued timestamps in order, repeating the last one.
pub(crate) struct FakeClock {
    times: RefCell<VecDeque<f64>>,
    last: Cell<f64>,
}

impl FakeClock {
    pub(crate) fn new(times: &[f64]) -> Self {
        Self {
            times: RefCell::new(times.iter().copied().collect()),
            last: Cell::new(times.last().copied().unwrap_or_default()),
        }
    }

    pub(crate) fn fixed(now: f64) -> Self {
        Self::new(&[now])
    }
}

impl Clock for FakeClock {
    fn now(&self) -> f64 {
        match self.times.borrow_mut().pop_front() {
            Some(time) => {
                self.last.set(time);
                time
            }
            None => self.last.get(),
        }
    }
}

/// Serves a canned record and records every save.
pub(crate) struct RecordingStore {
    loaded: Option<CacheRecord>,
    save_succeeds: bool,
    saves: RefCell<Vec<(PathBuf, CacheRecord)>>,
}

impl RecordingStore {
    pub(crate) fn new(loaded: Option<CacheRecord>) -> Self {
        Self {
            loaded,
            save_succeeds: true,
            saves: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing_saves(mut self) -> Self {
        self.save_succeeds = false;
        self
    }

    pub(crate) fn saves(&self) -> Vec<(PathBuf, CacheRecord)> {
        self.saves.borrow().clone()
    }

    pub(crate) fn saved_records(&self) -> Vec<CacheRecord> {
        self.saves
            .borrow()
            .iter()
            .map(|(_, record)| record.clone())
            .collect()
    }
}

impl RecordStore for RecordingStore {
    fn load(&self, _path: &Path) -> Option<CacheRecord> {
        self.loaded.clone()
    }

    fn save(&self, path: &Path, record: &CacheRecord) -> bool {
        self.saves
            .borrow_mut()
            .push((path.to_path_buf(), record.clone()));
        self.save_succeeds
    }
}

/// Returns a canned outcome and remembers how it was called.
pub(crate) struct FakeRunner {
    outcome: Result<CommandOutcome, String>,
    calls: RefCell<Vec<(String, Duration)>>,
}

impl FakeRunner {
    pub(crate) fn returning(return_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            outcome: Ok(CommandOutcome {
                return_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, timeout: Duration) -> Result<CommandOutcome, ProcessError> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), timeout));
        self.outcome
            .clone()
            .map_err(|message| ProcessError::SpawnFailed {
                command: command.to_string(),
                message,
            })
    }
}

/// Stays in the caller and remembers the requested exit codes.
#[derive(Default)]
pub(crate) struct RecordingDetacher {
    fail: bool,
    calls: RefCell<Vec<i32>>,
}

impl RecordingDetacher {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<i32> {
        self.calls.borrow().clone()
    }
}

impl Detacher for RecordingDetacher {
    fn detach(&self, parent_exit_code: i32) -> Result<(), ProcessError> {
        self.calls.borrow_mut().push(parent_exit_code);
        if self.fail {
            return Err(ProcessError::DetachFailed {
                message: "fork failed: EAGAIN".to_string(),
            });
        }
        Ok(())
    }
}

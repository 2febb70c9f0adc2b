use crate::cache::{CacheRecord, CheckStatus};

/// What to report for this poll, and whether the caller should refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub status: CheckStatus,
    pub message: String,
    pub should_refresh: bool,
}

impl Decision {
    pub fn new(status: CheckStatus, message: impl Into<String>, should_refresh: bool) -> Self {
        Self {
            status,
            message: message.into(),
            should_refresh,
        }
    }

    /// The plugin output line, e.g. `OK: disk usage 42%`.
    pub fn plugin_line(&self) -> String {
        format!("{}: {}", self.status, self.message)
    }
}

/// Result of the background leg of a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    /// The settled record built from the run.
    pub record: CacheRecord,
    /// False when the settled record could not be written.
    pub persisted: bool,
}

//! Cache record and plugin status types.
//!
//! A cache file holds one [`CacheRecord`] serialized as a flat JSON object:
//!
//! ```json
//! {
//!   "command": "check_disk -w 10% -c 5%",
//!   "timeout": 120,
//!   "return_code": 0,
//!   "stdout": "DISK OK",
//!   "stderr": "",
//!   "last_check": 1700000000.25,
//!   "last_runtime": 3.5,
//!   "refresh_launched": false
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::process::CommandOutcome;

/// Plugin status, mirroring the Nagios/Icinga plugin exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl CheckStatus {
    /// Map a plugin exit code to a status. Codes outside 0..=3 have no status.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(CheckStatus::Ok),
            1 => Some(CheckStatus::Warning),
            2 => Some(CheckStatus::Critical),
            3 => Some(CheckStatus::Unknown),
            _ => None,
        }
    }

    /// The process exit code for this status.
    pub fn code(self) -> i32 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Critical => 2,
            CheckStatus::Unknown => 3,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "OK"),
            CheckStatus::Warning => write!(f, "WARNING"),
            CheckStatus::Critical => write!(f, "CRITICAL"),
            CheckStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// The persisted state of one cached check.
///
/// Every field but `refresh_launched` is optional: the in-flight marker
/// written at the start of a refresh carries only the flag, and files
/// written by hand or by older versions may miss fields. Absent fields
/// are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Hard execution limit in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,

    /// Seconds since the epoch when the last run completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<f64>,

    /// Wall-clock seconds the last run took.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_runtime: Option<f64>,

    /// True while a background refresh is in flight.
    #[serde(default)]
    pub refresh_launched: bool,
}

impl CacheRecord {
    /// Placeholder written before any real result exists.
    pub fn provisional(command: &str, timeout: u64, created_at: f64) -> Self {
        Self {
            command: Some(command.to_string()),
            timeout: Some(timeout),
            return_code: Some(CheckStatus::Unknown.code()),
            stdout: Some(String::new()),
            stderr: Some(String::new()),
            last_check: Some(created_at),
            last_runtime: Some(0.0),
            refresh_launched: true,
        }
    }

    /// Minimal in-flight marker: `{"refresh_launched": true}`.
    pub fn marker() -> Self {
        Self {
            refresh_launched: true,
            ..Self::default()
        }
    }

    /// A completed run, timestamped at `finished`.
    pub fn settled(
        command: &str,
        timeout: u64,
        outcome: CommandOutcome,
        started: f64,
        finished: f64,
    ) -> Self {
        Self {
            command: Some(command.to_string()),
            timeout: Some(timeout),
            return_code: Some(outcome.return_code),
            stdout: Some(outcome.stdout),
            stderr: Some(outcome.stderr),
            last_check: Some(finished),
            last_runtime: Some(finished - started),
            refresh_launched: false,
        }
    }

    /// Status of the cached result, if its return code is a known plugin code.
    pub fn cached_status(&self) -> Option<CheckStatus> {
        self.return_code.and_then(CheckStatus::from_code)
    }

    /// The cached output as `"<stdout> - <stderr>"`, trailing newlines trimmed.
    pub fn cached_message(&self) -> String {
        format!(
            "{} - {}",
            self.stdout.as_deref().unwrap_or_default().trim_end(),
            self.stderr.as_deref().unwrap_or_default().trim_end()
        )
    }
}

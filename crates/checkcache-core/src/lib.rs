//! checkcache-core: cached execution of slow monitoring check commands
//!
//! Running a Nagios/Icinga style check synchronously on every poll can blow
//! past the monitoring timeout. This library keeps the last known result in
//! a JSON cache file, answers polls from it immediately, and re-runs the real
//! command in a detached background process when the cache gets old.
//!
//! # Main Entry Points
//!
//! - [`check`] - Decide what to report now, and refresh the cache
//! - [`cache`] - Cache record types, persistence, and staleness policy
//! - [`process`] - Command execution under a timeout, process detachment
//! - [`config`] - Configuration management

pub mod cache;
pub mod check;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod process;

// Re-export commonly used types at crate root for convenience
pub use cache::{CacheRecord, CheckStatus, FileStore, RecordStore};
pub use check::{Clock, Decision, SystemClock};
pub use config::CheckCacheConfig;
pub use process::{CommandOutcome, CommandRunner, Detacher, ForkDetacher, ShellRunner};

// Re-export handler module as the primary API
pub use check::handler as check_ops;

// Re-export logging initialization
pub use logging::init_logging;

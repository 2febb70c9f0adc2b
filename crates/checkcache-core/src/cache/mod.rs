pub mod persistence;
pub mod policy;
pub mod types;

// Re-export commonly used types
pub use persistence::{FileStore, RecordStore};
pub use policy::{cache_is_expired, runcmd_interval_respected};
pub use types::{CacheRecord, CheckStatus};

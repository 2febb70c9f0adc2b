pub mod clock;
pub mod decision;
pub mod errors;
pub mod handler;
pub mod refresh;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use decision::decide;
pub use errors::CheckError;
pub use refresh::Refresher;
pub use types::{Decision, RefreshOutcome};

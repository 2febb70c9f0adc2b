pub mod detach;
pub mod errors;
pub mod executor;
pub mod types;

pub use detach::{Detacher, ForkDetacher, StayAttached};
pub use errors::ProcessError;
pub use executor::{CommandRunner, ShellRunner, TIMEOUT_EXIT_CODE};
pub use types::CommandOutcome;

use crate::errors::CheckCacheError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to launch command '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    #[error("Failed to wait for command '{command}': {message}")]
    WaitFailed { command: String, message: String },

    #[error("Failed to detach refresh process: {message}")]
    DetachFailed { message: String },
}

impl CheckCacheError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::SpawnFailed { .. } => "PROCESS_SPAWN_FAILED",
            ProcessError::WaitFailed { .. } => "PROCESS_WAIT_FAILED",
            ProcessError::DetachFailed { .. } => "PROCESS_DETACH_FAILED",
        }
    }
}

use crate::errors::CheckCacheError;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Invalid command: cannot be empty")]
    EmptyCommand,

    #[error("Invalid timeout: must be greater than 0")]
    InvalidTimeout,

    #[error("Refresh aborted: {source}")]
    ProcessError {
        #[from]
        source: crate::process::errors::ProcessError,
    },
}

impl CheckCacheError for CheckError {
    fn error_code(&self) -> &'static str {
        match self {
            CheckError::EmptyCommand => "CHECK_EMPTY_COMMAND",
            CheckError::InvalidTimeout => "CHECK_INVALID_TIMEOUT",
            CheckError::ProcessError { .. } => "CHECK_PROCESS_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, CheckError::EmptyCommand | CheckError::InvalidTimeout)
    }
}

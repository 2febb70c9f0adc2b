//! Process detachment.
//!
//! Splits one refresh into a short foreground leg, which exits right away
//! with the status the caller already printed, and a background leg that
//! keeps running in its own session to finish the refresh.

use tracing::info;

use crate::process::errors::ProcessError;

/// Moves the rest of a refresh off the caller's critical path.
pub trait Detacher {
    /// Returns only in the process that should carry on with the refresh.
    ///
    /// The original caller terminates with `parent_exit_code`.
    fn detach(&self, parent_exit_code: i32) -> Result<(), ProcessError>;
}

/// Daemonizes with `fork` + `setsid`, standard streams on `/dev/null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForkDetacher;

#[cfg(unix)]
impl Detacher for ForkDetacher {
    fn detach(&self, parent_exit_code: i32) -> Result<(), ProcessError> {
        use std::io::Write;

        use nix::unistd::{ForkResult, fork, setsid};

        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();

        // SAFETY: the CLI is single-threaded when it reaches this point, so
        // the child does not inherit locks held by other threads.
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => {
                info!(
                    event = "core.process.detach_completed",
                    child_pid = child.as_raw(),
                    parent_exit_code = parent_exit_code
                );
                std::process::exit(parent_exit_code);
            }
            Ok(ForkResult::Child) => {}
            Err(errno) => {
                return Err(ProcessError::DetachFailed {
                    message: format!("fork failed: {}", errno),
                });
            }
        }

        setsid().map_err(|errno| ProcessError::DetachFailed {
            message: format!("setsid failed: {}", errno),
        })?;

        redirect_standard_streams()?;

        if let Err(errno) = nix::unistd::chdir("/") {
            tracing::debug!(event = "core.process.chdir_failed", error = %errno);
        }

        Ok(())
    }
}

#[cfg(unix)]
fn redirect_standard_streams() -> Result<(), ProcessError> {
    use std::fs::OpenOptions;
    use std::os::fd::{AsRawFd, RawFd};

    const STANDARD_STREAMS: [RawFd; 3] = [0, 1, 2];

    let dev_null = OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/null")
        .map_err(|e| ProcessError::DetachFailed {
            message: format!("cannot open /dev/null: {}", e),
        })?;

    for target in STANDARD_STREAMS {
        nix::unistd::dup2(dev_null.as_raw_fd(), target).map_err(|errno| {
            ProcessError::DetachFailed {
                message: format!("dup2 onto fd {} failed: {}", target, errno),
            }
        })?;
    }

    Ok(())
}

#[cfg(not(unix))]
impl Detacher for ForkDetacher {
    fn detach(&self, _parent_exit_code: i32) -> Result<(), ProcessError> {
        Err(ProcessError::DetachFailed {
            message: "process detachment is only supported on unix".to_string(),
        })
    }
}

/// Keeps the refresh in the calling process.
#[derive(Debug, Clone, Copy, Default)]
pub struct StayAttached;

impl Detacher for StayAttached {
    fn detach(&self, _parent_exit_code: i32) -> Result<(), ProcessError> {
        Ok(())
    }
}

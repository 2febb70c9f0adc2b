//! Command execution under a hard wall-clock timeout.
//!
//! The command string is opaque: it is handed to `/bin/sh -c` in a fresh
//! process group. When the deadline passes the whole group is killed and
//! the run reports [`TIMEOUT_EXIT_CODE`], the same code the coreutils
//! `timeout` wrapper uses.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::process::errors::ProcessError;
use crate::process::types::CommandOutcome;

/// Exit code reported for a command killed at its deadline.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Runs a check command and captures its result.
pub trait CommandRunner {
    fn run(&self, command: &str, timeout: Duration) -> Result<CommandOutcome, ProcessError>;
}

/// Runs commands through the system shell.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    poll_interval: Duration,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// True once every reader hit EOF, false if `deadline` passed first.
    fn wait_for_readers(
        &self,
        readers: &[&JoinHandle<Vec<u8>>],
        deadline: Option<Instant>,
    ) -> bool {
        loop {
            if readers.iter().all(|reader| reader.is_finished()) {
                return true;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return false;
            }
            thread::sleep(self.poll_interval);
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, timeout: Duration) -> Result<CommandOutcome, ProcessError> {
        info!(
            event = "core.process.run_started",
            command = command,
            timeout_secs = timeout.as_secs()
        );

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|e| ProcessError::SpawnFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        // An unrepresentable deadline means "never".
        let deadline = Instant::now().checked_add(timeout);
        let mut status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Some(status),
                Ok(None) if deadline.is_some_and(|deadline| Instant::now() >= deadline) => {
                    warn!(
                        event = "core.process.run_timed_out",
                        command = command,
                        pid = child.id(),
                        timeout_secs = timeout.as_secs()
                    );
                    kill_process_group(&mut child);
                    let _ = child.wait();
                    break None;
                }
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    kill_process_group(&mut child);
                    let _ = child.wait();
                    return Err(ProcessError::WaitFailed {
                        command: command.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        };

        // A background child can outlive the shell while holding the pipes.
        if status.is_some()
            && !self.wait_for_readers(&[&stdout_reader, &stderr_reader], deadline)
        {
            warn!(
                event = "core.process.output_timed_out",
                command = command,
                pid = child.id(),
                timeout_secs = timeout.as_secs()
            );
            kill_process_group(&mut child);
            status = None;
        }

        let stdout = collect_output(stdout_reader);
        let stderr = collect_output(stderr_reader);
        let return_code = status.map_or(TIMEOUT_EXIT_CODE, exit_code_of);

        info!(
            event = "core.process.run_completed",
            command = command,
            return_code = return_code
        );

        Ok(CommandOutcome {
            return_code,
            stdout,
            stderr,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut source) = source
            && let Err(e) = source.read_to_end(&mut buffer)
        {
            debug!(event = "core.process.output_read_failed", error = %e);
        }
        buffer
    })
}

fn collect_output(reader: JoinHandle<Vec<u8>>) -> String {
    let bytes = reader.join().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Exit code, or `128 + signal` for a command terminated by a signal.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    TIMEOUT_EXIT_CODE
}

#[cfg(unix)]
fn kill_process_group(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let pgid = Pid::from_raw(child.id() as i32);
    if let Err(errno) = killpg(pgid, Signal::SIGKILL) {
        warn!(
            event = "core.process.kill_group_failed",
            pid = child.id(),
            error = %errno
        );
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) {
    let _ = child.kill();
}

/// What a finished (or timed out) command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

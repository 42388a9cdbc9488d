//! Script execution errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file is absent from the scripts directory.
    #[error("{script} script not found")]
    NotFound { script: String },

    /// The process could not be started.
    #[error("Failed to start {script}: {reason}")]
    Spawn { script: String, reason: String },

    /// The process exited with a non-zero status.
    #[error("Command failed with exit code {code}: {script}\n{stderr}")]
    Failed {
        script: String,
        code: i32,
        stderr: String,
    },

    /// The process outlived the configured timeout.
    #[error("{script} timed out after {secs}s")]
    Timeout { script: String, secs: u64 },
}

impl ScriptError {
    /// Whether the script was missing rather than failing to run.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScriptError::NotFound { .. })
    }
}

//! Script execution.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::ScriptError;
use crate::invocation::{ScriptInvocation, ScriptOutput};

/// Runs collaborator scripts.
///
/// A run succeeds only when the process exits with status zero. Standard
/// error is captured but does not fail a run on its own.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, invocation: &ScriptInvocation) -> Result<ScriptOutput, ScriptError>;
}

/// Runs scripts as child processes with fully buffered output.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    interpreter: Option<String>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run scripts through `interpreter` instead of executing them directly.
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Kill runs that exceed `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, invocation: &ScriptInvocation) -> Command {
        let mut cmd = match &self.interpreter {
            Some(interpreter) => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(&invocation.program);
                cmd
            }
            None => Command::new(&invocation.program),
        };
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ScriptRunner for ProcessRunner {
    async fn run(&self, invocation: &ScriptInvocation) -> Result<ScriptOutput, ScriptError> {
        let name = invocation.name();
        info!("Executing: {}", invocation.command_line());

        let child = self.command(invocation).output();
        let output = match self.timeout {
            Some(limit) => timeout(limit, child).await.map_err(|_| ScriptError::Timeout {
                script: name.clone(),
                secs: limit.as_secs(),
            })?,
            None => child.await,
        }
        .map_err(|e| ScriptError::Spawn {
            script: name.clone(),
            reason: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stderr.is_empty() {
            warn!("{} stderr: {}", invocation.script, stderr.trim_end());
        }

        if output.status.success() {
            info!("{} output: {}", invocation.script, stdout.trim_end());
            Ok(ScriptOutput { stdout })
        } else {
            Err(ScriptError::Failed {
                script: name,
                code: output.status.code().unwrap_or(-1),
                stderr,
            })
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

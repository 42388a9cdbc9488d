//! Script invocation and captured output.

use std::path::{Path, PathBuf};

use crate::catalog::Script;

/// A script path with its argument list.
///
/// Arguments are passed to the process as-is, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub script: Script,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ScriptInvocation {
    pub fn new(script: Script, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            script,
            program: program.into(),
            args,
        }
    }

    /// `normalize_icon.sh -s <size> -d <output_dir> -p <input>`.
    pub fn resize(program: impl Into<PathBuf>, size: &str, output_dir: &Path, input: &Path) -> Self {
        Self::new(
            Script::NormalizeIcon,
            program,
            vec![
                "-s".to_string(),
                size.to_string(),
                "-d".to_string(),
                output_dir.to_string_lossy().into_owned(),
                "-p".to_string(),
                input.to_string_lossy().into_owned(),
            ],
        )
    }

    /// `<script> -c <client>`.
    pub fn for_client(script: Script, program: impl Into<PathBuf>, client: &str) -> Self {
        Self::new(script, program, vec!["-c".to_string(), client.to_string()])
    }

    /// File name of the program, for messages.
    pub fn name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Printable command line, for logs only.
    pub fn command_line(&self) -> String {
        let mut line = format!("\"{}\"", self.program.display());
        for arg in &self.args {
            line.push(' ');
            if arg.starts_with('-') {
                line.push_str(arg);
            } else {
                line.push_str(&format!("\"{}\"", arg));
            }
        }
        line
    }
}

/// Captured standard output of a successful run.
///
/// Standard error is logged by the runner and attached to failures only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    pub stdout: String,
}

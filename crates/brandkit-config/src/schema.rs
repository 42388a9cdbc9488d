//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub uploads: UploadsConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Resolve relative upload and script directories against `base`.
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.uploads.dir = resolve(base, &self.uploads.dir);
        self.scripts.dir = resolve(base, &self.scripts.dir);
        self
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Upload intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Directory holding transient upload and output files.
    #[serde(default = "default_uploads_dir")]
    pub dir: PathBuf,

    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_uploads_dir(),
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

/// 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Collaborator script configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Directory the scripts are looked up in.
    #[serde(default = "default_scripts_dir")]
    pub dir: PathBuf,

    /// Per-invocation timeout in seconds. `0` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: u64,

    /// Program used to run the scripts (e.g. `bash`). Unset executes them directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    #[serde(default = "default_normalize_icon")]
    pub normalize_icon: String,

    #[serde(default = "default_setup_firebase")]
    pub setup_firebase: String,

    #[serde(default = "default_setup_admin_firebase")]
    pub setup_admin_firebase: String,

    #[serde(default = "default_generate_assets")]
    pub generate_assets: String,
}

impl ScriptsConfig {
    /// Timeout applied to each script run, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            dir: default_scripts_dir(),
            timeout_secs: 0,
            interpreter: None,
            normalize_icon: default_normalize_icon(),
            setup_firebase: default_setup_firebase(),
            setup_admin_firebase: default_setup_admin_firebase(),
            generate_assets: default_generate_assets(),
        }
    }
}

fn default_scripts_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_normalize_icon() -> String {
    "normalize_icon.sh".to_string()
}

fn default_setup_firebase() -> String {
    "setup_firebase.sh".to_string()
}

fn default_setup_admin_firebase() -> String {
    "setup_admin_firebase.sh".to_string()
}

fn default_generate_assets() -> String {
    "generate_assets_utils.sh".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files. Empty disables file output.
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl LoggingConfig {
    /// Expanded log directory, if file logging is enabled.
    pub fn log_dir(&self) -> Option<PathBuf> {
        if self.dir.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(shellexpand::tilde(&self.dir).as_ref()))
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.brandkit/logs".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

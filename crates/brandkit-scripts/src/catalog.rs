//! Known collaborator scripts and their on-disk locations.

use std::fmt;
use std::path::{Path, PathBuf};

use brandkit_config::ScriptsConfig;

use crate::error::ScriptError;

/// A collaborator script the service shells out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Icon resizing (`-s <size> -d <outputDir> -p <inputPath>`).
    NormalizeIcon,
    /// Client Firebase setup (`-c <client>`).
    SetupFirebase,
    /// Admin Firebase setup (`-c <client>`).
    SetupAdminFirebase,
    /// Asset generation (`-c <client>`).
    GenerateAssets,
}

impl Script {
    pub const ALL: [Script; 4] = [
        Script::NormalizeIcon,
        Script::SetupFirebase,
        Script::SetupAdminFirebase,
        Script::GenerateAssets,
    ];

    /// Human-readable name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Script::NormalizeIcon => "Normalize icon",
            Script::SetupFirebase => "Client Firebase setup",
            Script::SetupAdminFirebase => "Admin Firebase setup",
            Script::GenerateAssets => "Generate assets",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolves scripts to paths inside a single directory.
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    dir: PathBuf,
    normalize_icon: String,
    setup_firebase: String,
    setup_admin_firebase: String,
    generate_assets: String,
}

impl ScriptCatalog {
    /// Catalog with the default script file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let defaults = ScriptsConfig::default();
        Self {
            dir: dir.into(),
            ..Self::from_config(&defaults)
        }
    }

    pub fn from_config(config: &ScriptsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            normalize_icon: config.normalize_icon.clone(),
            setup_firebase: config.setup_firebase.clone(),
            setup_admin_firebase: config.setup_admin_firebase.clone(),
            generate_assets: config.generate_assets.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of `script` within the directory.
    pub fn file_name(&self, script: Script) -> &str {
        match script {
            Script::NormalizeIcon => &self.normalize_icon,
            Script::SetupFirebase => &self.setup_firebase,
            Script::SetupAdminFirebase => &self.setup_admin_firebase,
            Script::GenerateAssets => &self.generate_assets,
        }
    }

    pub fn path(&self, script: Script) -> PathBuf {
        self.dir.join(self.file_name(script))
    }

    /// Path of `script`, or `NotFound` when the file does not exist.
    pub fn locate(&self, script: Script) -> Result<PathBuf, ScriptError> {
        let path = self.path(script);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ScriptError::NotFound {
                script: self.file_name(script).to_string(),
            })
        }
    }

    /// Scripts missing from the directory, for startup diagnostics.
    pub fn missing(&self) -> Vec<Script> {
        Script::ALL
            .into_iter()
            .filter(|s| !self.path(*s).is_file())
            .collect()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;

//! Application state.

use std::sync::Arc;

use brandkit_config::Config;
use brandkit_scripts::{ProcessRunner, ScriptCatalog, ScriptRunner};

use crate::upload::UploadStore;

/// Application state shared across handlers.
///
/// Nothing here is mutated after startup.
pub struct AppState {
    pub catalog: ScriptCatalog,
    pub runner: Arc<dyn ScriptRunner>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(catalog: ScriptCatalog, runner: Arc<dyn ScriptRunner>, uploads: UploadStore) -> Self {
        Self {
            catalog,
            runner,
            uploads,
        }
    }

    /// State backed by real child processes.
    pub fn from_config(config: &Config) -> Self {
        let mut runner = ProcessRunner::new();
        if let Some(interpreter) = &config.scripts.interpreter {
            runner = runner.with_interpreter(interpreter.clone());
        }
        if let Some(timeout) = config.scripts.timeout() {
            runner = runner.with_timeout(timeout);
        }

        Self::new(
            ScriptCatalog::from_config(&config.scripts),
            Arc::new(runner),
            UploadStore::from_config(&config.uploads),
        )
    }
}

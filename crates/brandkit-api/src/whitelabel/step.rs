//! Whitelabel step definitions and results.

use serde::Serialize;

use brandkit_scripts::ScriptError;

use crate::provision::{ProvisionTask, GENERATE_ASSETS, SETUP_ADMIN_FIREBASE, SETUP_CLIENT_FIREBASE};

/// One step of the whitelabel run.
#[derive(Debug)]
pub struct WhitelabelStep {
    /// Identifier reported to clients, e.g. `admin-firebase`.
    pub id: &'static str,
    /// 1-based position.
    pub number: usize,
    pub label: &'static str,
    pub task: &'static ProvisionTask,
}

pub static WHITELABEL_STEPS: [WhitelabelStep; 3] = [
    WhitelabelStep {
        id: "admin-firebase",
        number: 1,
        label: "Admin Firebase setup",
        task: &SETUP_ADMIN_FIREBASE,
    },
    WhitelabelStep {
        id: "client-firebase",
        number: 2,
        label: "Client Firebase setup",
        task: &SETUP_CLIENT_FIREBASE,
    },
    WhitelabelStep {
        id: "generate-assets",
        number: 3,
        label: "Asset generation",
        task: &GENERATE_ASSETS,
    },
];

/// Result of a completed step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    #[serde(skip)]
    pub step_id: &'static str,
    pub success: bool,
    /// Captured standard output.
    pub output: String,
    pub duration_ms: u64,
}

impl StepResult {
    pub fn success(step_id: &'static str, output: impl Into<String>) -> Self {
        Self {
            step_id,
            success: true,
            output: output.into(),
            duration_ms: 0,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// The step that stopped a whitelabel run.
#[derive(Debug)]
pub struct StepFailure {
    pub step: &'static WhitelabelStep,
    pub error: ScriptError,
    /// Steps that finished before the failure.
    pub completed: Vec<StepResult>,
}

impl StepFailure {
    /// `Setup failed at Step N: <label>`.
    pub fn message(&self) -> String {
        format!("Setup failed at Step {}: {}", self.step.number, self.step.label)
    }
}

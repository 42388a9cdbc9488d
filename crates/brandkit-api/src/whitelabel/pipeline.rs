//! Sequential whitelabel executor.

use std::time::Instant;

use tracing::{error, info};

use brandkit_scripts::{ScriptCatalog, ScriptRunner};

use super::step::{StepFailure, StepResult, WHITELABEL_STEPS};

/// Runs whitelabel steps one after another for a single client.
pub struct WhitelabelPipeline<'a> {
    catalog: &'a ScriptCatalog,
    runner: &'a dyn ScriptRunner,
}

impl<'a> WhitelabelPipeline<'a> {
    pub fn new(catalog: &'a ScriptCatalog, runner: &'a dyn ScriptRunner) -> Self {
        Self { catalog, runner }
    }

    /// Run every step for `client`, stopping at the first failure.
    pub async fn run(&self, client: &str) -> Result<Vec<StepResult>, StepFailure> {
        info!("Starting whitelabel setup for client folder: {}", client);
        let mut completed = Vec::with_capacity(WHITELABEL_STEPS.len());

        for step in WHITELABEL_STEPS.iter() {
            info!("Step {}: {}...", step.number, step.label);
            let start = Instant::now();

            match step.task.execute(self.catalog, self.runner, client).await {
                Ok(output) => {
                    let duration_ms = start.elapsed().as_millis() as u64;
                    info!(
                        "Step {}: {} completed successfully ({} ms)",
                        step.number, step.label, duration_ms
                    );
                    completed.push(StepResult::success(step.id, output.stdout).with_duration(duration_ms));
                }
                Err(e) => {
                    error!("Step {} failed: {} error: {}", step.number, step.label, e);
                    return Err(StepFailure {
                        step,
                        error: e,
                        completed,
                    });
                }
            }
        }

        info!("Whitelabel setup completed successfully for client folder: {}", client);
        Ok(completed)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

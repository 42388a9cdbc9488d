//! Whitelabel handler.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::provision::client_id;
use crate::state::AppState;
use crate::whitelabel::{StepFailure, StepResult, WhitelabelPipeline};

const QUERY_KEY: &str = "client-folder";
const BODY_KEY: &str = "clientFolder";

#[derive(Debug, Serialize)]
pub struct WhitelabelResponse {
    pub success: bool,
    pub message: String,
    /// Keyed by step id.
    pub steps: BTreeMap<&'static str, StepResult>,
}

/// `POST /setup-whitelabel`
pub async fn setup_whitelabel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<WhitelabelResponse>, ApiError> {
    let client = client_id(QUERY_KEY, BODY_KEY, &query, &body)?;

    let results = WhitelabelPipeline::new(&state.catalog, state.runner.as_ref())
        .run(&client)
        .await
        .map_err(step_error)?;

    let message = format!("Whitelabel setup completed successfully for client: {}", client);
    info!("{}", message);
    Ok(Json(WhitelabelResponse {
        success: true,
        message,
        steps: results.into_iter().map(|r| (r.step_id, r)).collect(),
    }))
}

fn step_error(failure: StepFailure) -> ApiError {
    ApiError::StepFailed {
        error: failure.message(),
        step: failure.step.id,
        details: failure.error.to_string(),
    }
}

#[cfg(test)]
#[path = "whitelabel_tests.rs"]
mod tests;

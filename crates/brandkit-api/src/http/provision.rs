//! Provisioning handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::provision::{client_id, ProvisionTask, GENERATE_ASSETS, SETUP_ADMIN_FIREBASE, SETUP_CLIENT_FIREBASE};
use crate::state::AppState;

/// Success body shared by the single-script endpoints.
#[derive(Debug, Serialize)]
pub struct ProvisionResponse {
    pub success: bool,
    pub message: String,
    /// Captured standard output of the script.
    pub output: String,
}

/// `POST /generate-assets`
pub async fn generate_assets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<ProvisionResponse>, ApiError> {
    provision(&state, &GENERATE_ASSETS, &query, &body).await
}

/// `POST /setup-client-firebase`
pub async fn setup_client_firebase(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<ProvisionResponse>, ApiError> {
    provision(&state, &SETUP_CLIENT_FIREBASE, &query, &body).await
}

/// `POST /setup-admin-firebase`
pub async fn setup_admin_firebase(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<ProvisionResponse>, ApiError> {
    provision(&state, &SETUP_ADMIN_FIREBASE, &query, &body).await
}

async fn provision(
    state: &AppState,
    task: &ProvisionTask,
    query: &HashMap<String, String>,
    body: &[u8],
) -> Result<Json<ProvisionResponse>, ApiError> {
    let client = client_id(task.query_key, task.body_key, query, body)?;
    let output = task
        .run(&state.catalog, state.runner.as_ref(), &client)
        .await?;

    let message = task.success_message(&client);
    info!("{}", message);
    Ok(Json(ProvisionResponse {
        success: true,
        message,
        output: output.stdout,
    }))
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;

//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::http::{health, provision, resize, whitelabel};
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Create the router.
///
/// ## Route Structure
///
/// ```text
/// POST /resize-icon?size=N            - Resize an uploaded image to icon.png
/// POST /generate-assets               - Generate assets for a client
/// POST /setup-client-firebase         - Client Firebase setup
/// POST /setup-admin-firebase          - Admin Firebase setup
/// POST /setup-whitelabel              - All three provisioning steps in order
/// GET  /health                        - Liveness
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    // The upload route gets its own body ceiling derived from the file limit
    let body_limit = usize::try_from(
        state
            .uploads
            .max_file_size()
            .saturating_add(MULTIPART_OVERHEAD),
    )
    .unwrap_or(usize::MAX);

    let resize_routes = Router::new()
        .route("/resize-icon", post(resize::resize_icon))
        .layer(DefaultBodyLimit::max(body_limit));

    let provision_routes = Router::new()
        .route("/generate-assets", post(provision::generate_assets))
        .route("/setup-client-firebase", post(provision::setup_client_firebase))
        .route("/setup-admin-firebase", post(provision::setup_admin_firebase))
        .route("/setup-whitelabel", post(whitelabel::setup_whitelabel));

    Router::new()
        .merge(resize_routes)
        .merge(provision_routes)
        .route("/health", get(health::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

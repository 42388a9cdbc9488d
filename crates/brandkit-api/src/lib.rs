//! # Brandkit API
//!
//! HTTP interface in front of the collaborator scripts:
//! - **Resize**: `POST /resize-icon` uploads an image and streams back `icon.png`
//! - **Provision**: `POST /generate-assets`, `/setup-client-firebase`,
//!   `/setup-admin-firebase` run one script for a client folder
//! - **Whitelabel**: `POST /setup-whitelabel` runs the three provisioning
//!   scripts in order and stops at the first failure
//! - **Health**: `GET /health`
//!
//! Every request is independent. Scripts run through a [`ScriptRunner`]
//! so tests can substitute a recording runner.
//!
//! [`ScriptRunner`]: brandkit_scripts::ScriptRunner

pub mod error;
pub mod http;
pub mod provision;
pub mod server;
pub mod state;
pub mod upload;
pub mod whitelabel;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiError;
pub use http::routes::create_router;
pub use provision::ProvisionTask;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
pub use upload::{FileGuard, StoredUpload, UploadStore};
pub use whitelabel::{StepFailure, StepResult, WhitelabelPipeline, WhitelabelStep};

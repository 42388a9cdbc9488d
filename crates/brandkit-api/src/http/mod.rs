//! HTTP interface module.
//!
//! Provides REST endpoints for:
//! - Icon resizing
//! - Client provisioning and whitelabel orchestration
//! - Health checks

pub mod routes;

pub(crate) mod health;
pub(crate) mod provision;
pub(crate) mod resize;
pub(crate) mod whitelabel;

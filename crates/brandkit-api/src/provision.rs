//! Client provisioning tasks.
//!
//! Each provisioning endpoint runs one script with `-c <client>`. A
//! [`ProvisionTask`] holds everything that differs between them.

use std::collections::HashMap;

use tracing::{error, info};

use brandkit_scripts::{Script, ScriptCatalog, ScriptError, ScriptInvocation, ScriptOutput, ScriptRunner};

use crate::error::ApiError;

/// A single-script provisioning operation.
#[derive(Debug)]
pub struct ProvisionTask {
    pub script: Script,
    /// Query parameter naming the client.
    pub query_key: &'static str,
    /// JSON body field naming the client, used when the query lacks it.
    pub body_key: &'static str,
    /// Success message; the client identifier is appended.
    pub success_prefix: &'static str,
    /// `error` field of the failure response.
    pub failure: &'static str,
}

pub static GENERATE_ASSETS: ProvisionTask = ProvisionTask {
    script: Script::GenerateAssets,
    query_key: "client-name",
    body_key: "clientName",
    success_prefix: "Assets generated successfully for client: ",
    failure: "Failed to generate assets",
};

pub static SETUP_CLIENT_FIREBASE: ProvisionTask = ProvisionTask {
    script: Script::SetupFirebase,
    query_key: "client-folder",
    body_key: "clientFolder",
    success_prefix: "Firebase setup completed successfully for client folder: ",
    failure: "Failed to setup Firebase",
};

pub static SETUP_ADMIN_FIREBASE: ProvisionTask = ProvisionTask {
    script: Script::SetupAdminFirebase,
    query_key: "client-folder",
    body_key: "clientFolder",
    success_prefix: "Admin Firebase setup completed successfully for client folder: ",
    failure: "Failed to setup Admin Firebase",
};

impl ProvisionTask {
    pub fn success_message(&self, client: &str) -> String {
        format!("{}{}", self.success_prefix, client)
    }

    /// Locate and run the script for `client`.
    pub async fn execute(
        &self,
        catalog: &ScriptCatalog,
        runner: &dyn ScriptRunner,
        client: &str,
    ) -> Result<ScriptOutput, ScriptError> {
        let program = catalog.locate(self.script)?;
        let invocation = ScriptInvocation::for_client(self.script, program, client);
        runner.run(&invocation).await
    }

    /// Run the task and translate failures into an API error.
    pub async fn run(
        &self,
        catalog: &ScriptCatalog,
        runner: &dyn ScriptRunner,
        client: &str,
    ) -> Result<ScriptOutput, ApiError> {
        info!("{} requested for client folder: {}", self.script, client);
        self.execute(catalog, runner, client).await.map_err(|e| {
            error!("{}: {}", self.failure, e);
            ApiError::operation(self.failure, e.to_string())
        })
    }
}

/// Client identifier from the query string, else from a JSON body.
///
/// The query wins when both are present. Blank values count as absent;
/// anything else is forwarded exactly as received.
pub fn client_id(
    query_key: &'static str,
    body_key: &str,
    query: &HashMap<String, String>,
    body: &[u8],
) -> Result<String, ApiError> {
    let from_query = query
        .get(query_key)
        .filter(|v| !v.trim().is_empty())
        .cloned();

    let client = match from_query {
        Some(client) => client,
        None => body_client_id(body_key, body)?.ok_or(ApiError::MissingParameter(query_key))?,
    };

    validate_client_id(query_key, &client)?;
    Ok(client)
}

fn body_client_id(body_key: &str, body: &[u8]) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    Ok(value
        .get(body_key)
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string))
}

/// Identifiers are passed as a single argv entry, so shell metacharacters are
/// harmless. Option-like and control-character values are still refused.
pub fn validate_client_id(key: &'static str, client: &str) -> Result<(), ApiError> {
    if client.starts_with('-') {
        return Err(ApiError::InvalidParameter {
            key,
            reason: "must not start with '-'".to_string(),
        });
    }
    if client.chars().any(char::is_control) {
        return Err(ApiError::InvalidParameter {
            key,
            reason: "must not contain control characters".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;

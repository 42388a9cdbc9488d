use super::*;
use crate::create_router;
use crate::testing::{install_scripts, test_state, RecordingRunner};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use brandkit_scripts::Script;
use tempfile::TempDir;
use tower::ServiceExt;

fn setup(runner: RecordingRunner) -> (TempDir, Arc<RecordingRunner>, Arc<AppState>) {
    let temp_dir = TempDir::new().unwrap();
    install_scripts(temp_dir.path());
    let runner = Arc::new(runner);
    let state = test_state(temp_dir.path(), &temp_dir.path().join("uploads"), runner.clone());
    (temp_dir, runner, state)
}

async fn post(state: Arc<AppState>, uri: &str, body: &str) -> Response {
    let mut request = Request::builder().method("POST").uri(uri);
    if !body.is_empty() {
        request = request.header("content-type", "application/json");
    }
    create_router(state)
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_assets_from_query() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    let response = post(state, "/generate-assets?client-name=acme", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Assets generated successfully for client: acme");
    assert_eq!(json["output"], "generate_assets_utils.sh ok -c acme\n");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].script, Script::GenerateAssets);
    assert_eq!(calls[0].args, vec!["-c", "acme"]);
}

#[tokio::test]
async fn test_setup_client_firebase_from_body() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    let response = post(state, "/setup-client-firebase", r#"{"clientFolder":"globex"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(response).await["message"],
        "Firebase setup completed successfully for client folder: globex"
    );
    assert_eq!(runner.scripts_called(), vec![Script::SetupFirebase]);
}

#[tokio::test]
async fn test_setup_admin_firebase_query_wins() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    let response = post(
        state,
        "/setup-admin-firebase?client-folder=acme",
        r#"{"clientFolder":"globex"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(response).await["message"],
        "Admin Firebase setup completed successfully for client folder: acme"
    );
    assert_eq!(runner.calls()[0].args, vec!["-c", "acme"]);
}

#[tokio::test]
async fn test_identifier_reaches_script_unchanged() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    let response = post(state, "/setup-client-firebase?client-folder=%20acme%20", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(runner.calls()[0].args, vec!["-c", " acme "]);
}

#[tokio::test]
async fn test_missing_identifier_spawns_nothing() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    let response = post(state, "/setup-client-firebase", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json(response).await;
    assert_eq!(json["error"], "client-folder parameter is required");
    assert_eq!(json["code"], "missing_parameter");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_generate_assets_requires_client_name() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    // clientFolder is not the key for this endpoint
    let response = post(state, "/generate-assets", r#"{"clientFolder":"acme"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "client-name parameter is required");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_option_like_identifier_rejected() {
    let (_dir, runner, state) = setup(RecordingRunner::new());

    let response = post(state, "/generate-assets?client-name=--help", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["code"], "invalid_parameter");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_script_failure_reports_details() {
    let (_dir, runner, state) = setup(RecordingRunner::new());
    runner.fail(Script::GenerateAssets, 3, "logo.svg missing");

    let response = post(state, "/generate-assets?client-name=acme", "").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json(response).await;
    assert_eq!(json["error"], "Failed to generate assets");
    let details = json["details"].as_str().unwrap();
    assert!(details.contains("exit code 3"));
    assert!(details.contains("logo.svg missing"));
}

#[tokio::test]
async fn test_missing_script_reported_as_failure() {
    let (dir, runner, state) = setup(RecordingRunner::new());
    std::fs::remove_file(dir.path().join("setup_admin_firebase.sh")).unwrap();

    let response = post(state, "/setup-admin-firebase?client-folder=acme", "").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json(response).await;
    assert_eq!(json["error"], "Failed to setup Admin Firebase");
    assert_eq!(json["details"], "setup_admin_firebase.sh script not found");
    assert!(runner.calls().is_empty());
}

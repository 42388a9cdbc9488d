//! Test doubles shared by the handler tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;

use brandkit_scripts::{Script, ScriptCatalog, ScriptError, ScriptInvocation, ScriptOutput, ScriptRunner};

use crate::state::AppState;
use crate::upload::UploadStore;

pub(crate) const BOUNDARY: &str = "brandkit-test-boundary";

/// Smallest valid PNG signature, enough for content checks.
pub(crate) const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n-resized-";

/// Records invocations and answers from a script table instead of spawning.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<ScriptInvocation>>,
    failures: Mutex<HashMap<Script, (i32, String)>>,
    write_icon: bool,
}

impl RecordingRunner {
    /// A runner whose resize runs produce `icon.png`.
    pub(crate) fn new() -> Self {
        Self {
            write_icon: true,
            ..Default::default()
        }
    }

    /// A runner whose resize runs succeed without writing output.
    pub(crate) fn without_icon() -> Self {
        Self::default()
    }

    pub(crate) fn fail(&self, script: Script, code: i32, stderr: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(script, (code, stderr.to_string()));
    }

    pub(crate) fn calls(&self) -> Vec<ScriptInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn scripts_called(&self) -> Vec<Script> {
        self.calls().into_iter().map(|c| c.script).collect()
    }
}

#[async_trait]
impl ScriptRunner for RecordingRunner {
    async fn run(&self, invocation: &ScriptInvocation) -> Result<ScriptOutput, ScriptError> {
        self.calls.lock().unwrap().push(invocation.clone());

        if let Some((code, stderr)) = self.failures.lock().unwrap().get(&invocation.script) {
            return Err(ScriptError::Failed {
                script: invocation.name(),
                code: *code,
                stderr: stderr.clone(),
            });
        }

        if invocation.script == Script::NormalizeIcon && self.write_icon {
            let out_dir = Path::new(&invocation.args[3]);
            std::fs::write(out_dir.join("icon.png"), PNG_BYTES).unwrap();
        }

        Ok(ScriptOutput {
            stdout: format!("{} ok {}\n", invocation.name(), invocation.args.join(" ")),
        })
    }
}

/// Creates empty placeholder files for every script in `dir`.
pub(crate) fn install_scripts(dir: &Path) {
    let catalog = ScriptCatalog::new(dir);
    for script in Script::ALL {
        std::fs::write(catalog.path(script), "#!/bin/sh\n").unwrap();
    }
}

pub(crate) fn test_state(
    scripts_dir: &Path,
    uploads_dir: &Path,
    runner: Arc<RecordingRunner>,
) -> Arc<AppState> {
    test_state_with_limit(scripts_dir, uploads_dir, runner, brandkit_config::DEFAULT_MAX_FILE_SIZE)
}

pub(crate) fn test_state_with_limit(
    scripts_dir: &Path,
    uploads_dir: &Path,
    runner: Arc<RecordingRunner>,
    max_file_size: u64,
) -> Arc<AppState> {
    Arc::new(AppState::new(
        ScriptCatalog::new(scripts_dir),
        runner,
        UploadStore::new(uploads_dir, max_file_size),
    ))
}

/// Multipart body with a single file part.
pub(crate) fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub(crate) fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Direct children of `dir`.
pub(crate) fn entries(dir: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(rd) => rd.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Waits for `dir` to become empty. Guard deletions run on the blocking pool.
pub(crate) async fn wait_until_empty(dir: &Path) {
    for _ in 0..200 {
        if entries(dir).is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{} still contains {:?}", dir.display(), entries(dir));
}

/// Waits for `path` to disappear.
pub(crate) async fn wait_until_gone(path: &Path) {
    for _ in 0..200 {
        if !path.exists() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{} was not removed", path.display());
}

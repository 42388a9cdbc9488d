//! Icon resize handler.
//!
//! The response body streams `icon.png` straight from the per-request work
//! directory. The upload and work-directory guards travel with the body and
//! are released once the stream ends or the client goes away.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::header,
    response::Response,
};
use futures::Stream;
use serde::Deserialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{error, info};

use brandkit_scripts::{Script, ScriptInvocation};

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::FileGuard;

/// File the resize script writes into its output directory.
pub const RESIZED_ICON: &str = "icon.png";

/// Size forwarded to the script when the query omits it.
pub const DEFAULT_SIZE: &str = "1024";

const PROCESS_FAILED: &str = "Failed to process image";

#[derive(Debug, Default, Deserialize)]
pub struct ResizeParams {
    pub size: Option<String>,
}

/// `POST /resize-icon?size=N`
pub async fn resize_icon(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResizeParams>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = state.uploads.receive(multipart).await?;
    let size = params
        .size
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SIZE.to_string());

    let program = state.catalog.locate(Script::NormalizeIcon).map_err(|e| {
        error!("{}", e);
        ApiError::ScriptMissing(e.to_string())
    })?;

    let work_dir = state.uploads.work_dir(&upload).await?;
    let invocation = ScriptInvocation::resize(program, &size, work_dir.path(), upload.path());
    info!(
        size = %size,
        input = %upload.path().display(),
        original_name = upload.original_name.as_deref().unwrap_or("-"),
        content_type = %upload.content_type,
        bytes = upload.size,
        "Resizing icon"
    );

    if let Err(e) = state.runner.run(&invocation).await {
        error!("Error processing image: {}", e);
        return Err(ApiError::operation(PROCESS_FAILED, e.to_string()));
    }

    let icon_path = work_dir.path().join(RESIZED_ICON);
    let file = match File::open(&icon_path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!("Resize script produced no {}", icon_path.display());
            return Err(ApiError::operation(
                PROCESS_FAILED,
                "Failed to create resized image",
            ));
        }
        Err(e) => return Err(ApiError::internal(e)),
    };
    let length = file.metadata().await.map_err(ApiError::internal)?.len();

    let body = GuardedStream::new(ReaderStream::new(file), vec![upload.into_guard(), work_dir]);
    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"resized-icon.png\"",
        )
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from_stream(body))
        .map_err(ApiError::internal)
}

/// Stream adapter that owns file guards until the inner stream is exhausted
/// or dropped.
struct GuardedStream<S> {
    inner: S,
    guards: Vec<FileGuard>,
}

impl<S> GuardedStream<S> {
    fn new(inner: S, guards: Vec<FileGuard>) -> Self {
        Self { inner, guards }
    }
}

impl<S: Stream + Unpin> Stream for GuardedStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_next(cx);
        if let Poll::Ready(None) = poll {
            this.guards.clear();
        }
        poll
    }
}

#[cfg(test)]
#[path = "resize_tests.rs"]
mod tests;

//! Upload intake and transient file lifetime.
//!
//! Uploaded images are written to the uploads directory under a generated
//! name. Every file or directory the service creates there is owned by a
//! [`FileGuard`], which deletes it when dropped. Dropping happens exactly once
//! per request, on the error path as well as after a streamed response body
//! has been released. Inside a runtime the deletion runs on the blocking pool,
//! so it completes shortly after the drop rather than during it.

use std::io;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use brandkit_config::UploadsConfig;

use crate::error::ApiError;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardKind {
    File,
    Dir,
}

/// Deletes a path when dropped.
#[derive(Debug)]
pub struct FileGuard {
    path: PathBuf,
    kind: GuardKind,
}

impl FileGuard {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: GuardKind::File,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: GuardKind::Dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        let path = std::mem::take(&mut self.path);
        let kind = self.kind;
        // Guards usually drop on a runtime worker; keep the filesystem call off it
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || remove(&path, kind));
            }
            Err(_) => remove(&path, kind),
        }
    }
}

fn remove(path: &Path, kind: GuardKind) {
    let result = match kind {
        GuardKind::File => std::fs::remove_file(path),
        GuardKind::Dir => std::fs::remove_dir_all(path),
    };
    match result {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Error deleting {}: {}", path.display(), e),
    }
}

/// An image written to the uploads directory.
#[derive(Debug)]
pub struct StoredUpload {
    pub original_name: Option<String>,
    pub content_type: String,
    pub size: u64,
    guard: FileGuard,
}

impl StoredUpload {
    pub fn path(&self) -> &Path {
        self.guard.path()
    }

    /// Name without directory or extension.
    pub fn stem(&self) -> String {
        self.path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn into_guard(self) -> FileGuard {
        self.guard
    }
}

/// Writes uploads into a single directory with a size ceiling.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_file_size: u64,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            dir: dir.into(),
            max_file_size,
        }
    }

    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(config.dir.clone(), config.max_file_size)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Create the uploads directory if it is absent.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        if !fs::try_exists(&self.dir).await.unwrap_or(false) {
            fs::create_dir_all(&self.dir).await?;
            info!("Created uploads directory {}", self.dir.display());
        }
        Ok(())
    }

    /// Store the `image` field of a multipart request.
    ///
    /// The content type is checked before anything touches the disk. A file
    /// that grows past the size ceiling is removed before returning.
    pub async fn receive(&self, mut multipart: Multipart) -> Result<StoredUpload, ApiError> {
        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(ApiError::from_multipart)?
        {
            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }

            let content_type = field.content_type().unwrap_or_default().to_string();
            if !content_type.starts_with("image/") {
                warn!("Rejected upload with content type '{}'", content_type);
                return Err(ApiError::InvalidFileType);
            }

            let original_name = field.file_name().map(|s| s.to_string());
            let extension = original_name.as_deref().map(extension_of).unwrap_or_default();

            self.ensure_dir().await.map_err(ApiError::internal)?;
            let guard = FileGuard::file(self.dir.join(unique_name(&extension)));
            let mut file = fs::File::create(guard.path())
                .await
                .map_err(ApiError::internal)?;

            let mut size = 0u64;
            while let Some(chunk) = field.chunk().await.map_err(ApiError::from_multipart)? {
                size += chunk.len() as u64;
                if size > self.max_file_size {
                    warn!(
                        size,
                        max_file_size = self.max_file_size,
                        "Upload exceeds size limit, aborting"
                    );
                    return Err(ApiError::FileTooLarge);
                }
                file.write_all(&chunk).await.map_err(ApiError::internal)?;
            }
            file.flush().await.map_err(ApiError::internal)?;

            info!(
                path = %guard.path().display(),
                size,
                "Stored upload"
            );
            return Ok(StoredUpload {
                original_name,
                content_type,
                size,
                guard,
            });
        }

        Err(ApiError::MissingFile)
    }

    /// Create a private output directory for the script working on `upload`.
    pub async fn work_dir(&self, upload: &StoredUpload) -> Result<FileGuard, ApiError> {
        let guard = FileGuard::dir(self.dir.join(format!("{}.out", upload.stem())));
        fs::create_dir_all(guard.path())
            .await
            .map_err(ApiError::internal)?;
        Ok(guard)
    }
}

/// `<unix millis>-<random><extension>`.
pub(crate) fn unique_name(extension: &str) -> String {
    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}

/// Extension of the client-supplied name, dot included, or empty.
pub(crate) fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy())
        .filter(|e| !e.is_empty() && e.len() <= 16 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;

//! Media storage collaborator seam.
//!
//! The engine never reads media bytes; it only needs to signal the storage
//! collaborator when a content row is deleted so the backing object goes
//! too. The trait keeps object storage behind the boundary: production can
//! plug in a bucket-backed store without touching the handlers.

use std::path::PathBuf;

use async_trait::async_trait;
use showyo_core::error::CoreError;

/// Removal signal to wherever the media objects live.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Remove the object at `storage_path`. Removing an object that is
    /// already gone must succeed, so retries stay idempotent.
    async fn remove(&self, storage_path: &str) -> Result<(), CoreError>;
}

/// Filesystem-backed store rooted at a local directory.
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn remove(&self, storage_path: &str) -> Result<(), CoreError> {
        showyo_core::media::validate_storage_path(storage_path)?;

        match tokio::fs::remove_file(self.root.join(storage_path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::ExternalService(format!(
                "Failed to remove media object '{storage_path}': {e}"
            ))),
        }
    }
}

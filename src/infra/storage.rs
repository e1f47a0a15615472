//! File storage for uploaded images.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stores opaque file bodies under a generated name.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist `bytes` as `filename`, replacing any existing file.
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> AppResult<()>;
}

/// Local directory storage, served back by the static file route.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Upload directory unavailable: {}", e)))?;

        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "Stored upload");
        Ok(())
    }
}

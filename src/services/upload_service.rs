//! Upload service - image uploads for property and unit listings.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ALLOWED_IMAGE_TYPES, UPLOAD_URL_PREFIX};
use crate::errors::{AppError, AppResult};
use crate::infra::FileStorage;

/// Stored upload, addressable under `/uploads`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadedFile {
    pub success: bool,
    #[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e.jpg")]
    pub filename: String,
    #[schema(example = "/uploads/0f8fad5b-d9cb-469f-a165-70867728950e.jpg")]
    pub url: String,
    pub size: usize,
}

#[async_trait]
pub trait UploadService: Send + Sync {
    /// Check type and size, then store under a fresh name
    async fn upload_image(&self, content_type: Option<String>, bytes: Vec<u8>)
        -> AppResult<UploadedFile>;
}

/// Extension for an accepted image content type.
fn image_extension(content_type: Option<&str>) -> AppResult<&'static str> {
    let content_type = content_type.map(|ct| ct.trim().to_ascii_lowercase());
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| content_type.as_deref() == Some(*mime))
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            AppError::bad_request("Invalid file type. Only JPEG, PNG, and WebP are allowed.")
        })
}

pub struct Uploader {
    storage: Arc<dyn FileStorage>,
    max_bytes: usize,
}

impl Uploader {
    pub fn new(storage: Arc<dyn FileStorage>, max_bytes: usize) -> Self {
        Self { storage, max_bytes }
    }
}

#[async_trait]
impl UploadService for Uploader {
    async fn upload_image(
        &self,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> AppResult<UploadedFile> {
        let extension = image_extension(content_type.as_deref())?;
        if bytes.len() > self.max_bytes {
            return Err(AppError::bad_request(format!(
                "File too large. Maximum size is {}MB.",
                self.max_bytes / (1024 * 1024)
            )));
        }

        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let size = bytes.len();
        self.storage.save(&filename, bytes).await?;

        tracing::info!(filename = %filename, size, "Image uploaded");
        Ok(UploadedFile {
            success: true,
            url: format!("{}/{}", UPLOAD_URL_PREFIX, filename),
            filename,
            size,
        })
    }
}

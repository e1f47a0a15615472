//! Image upload handler.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::UPLOAD_FIELD_NAME;
use crate::errors::{AppError, AppResult};
use crate::services::UploadedFile;

/// Multipart upload form
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// JPEG, PNG or WebP image
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Upload an image; it is served back under `/uploads`
#[utoipa::path(
    post,
    path = "/uploads",
    tag = "Uploads",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadedFile),
        (status = 400, description = "Missing file, wrong type or too large"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadedFile>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let uploaded = state
            .upload_service
            .upload_image(content_type, bytes.to_vec())
            .await?;
        return Ok((StatusCode::CREATED, Json(uploaded)));
    }

    Err(AppError::bad_request("No file provided"))
}

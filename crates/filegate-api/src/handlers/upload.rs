use crate::error::{ErrorResponse, HttpAppError, UploadBody};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use filegate_core::constants::UPLOAD_URL_EXPIRY;
use filegate_core::models::{UploadRequest, UploadResponse};
use filegate_core::{AppError, ObjectKey, SignedOperation};
use std::sync::Arc;

/// Issue a presigned URL for uploading a file directly to storage
///
/// The returned `objectKey` is `<12-char code>_<filename>`, where `filename` has every
/// directory component removed. The client `PUT`s the file bytes to `uploadUrl` with the same
/// `Content-Type` before `expiresAt`.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body = UploadRequest,
    responses(
        (status = 201, description = "Upload URL issued", body = UploadResponse),
        (status = 400, description = "Invalid JSON body or missing filename", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Failed to generate upload URL", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(operation = "create_upload_url", object_key = tracing::field::Empty)
)]
pub async fn create_upload_url(
    State(state): State<Arc<AppState>>,
    UploadBody(request): UploadBody,
) -> Result<impl IntoResponse, HttpAppError> {
    let filename = request.filename()?;
    let content_type = request.content_type();

    let object_key = ObjectKey::generate(filename)?;
    tracing::Span::current().record("object_key", object_key.as_str());

    let upload_url = state
        .storage
        .presigned_put_url(object_key.as_str(), content_type, UPLOAD_URL_EXPIRY)
        .await
        .map_err(|e| AppError::Signing {
            operation: SignedOperation::Upload,
            object_key: None,
            message: e.to_string(),
        })?;

    let expires_at = Utc::now()
        + chrono::Duration::from_std(UPLOAD_URL_EXPIRY)
            .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(
        content_type = %content_type,
        expires_in_seconds = UPLOAD_URL_EXPIRY.as_secs(),
        "Upload URL issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            object_key: object_key.into_string(),
            upload_url,
            expires_at,
        }),
    ))
}

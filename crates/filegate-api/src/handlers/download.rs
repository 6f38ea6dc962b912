use crate::error::{ErrorResponse, HttpAppError, ObjectKeyPath};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use filegate_core::constants::DOWNLOAD_URL_EXPIRY;
use filegate_core::{AppError, SignedOperation};
use filegate_storage::StorageError;
use std::sync::Arc;

/// Map a failed existence check onto the error reported to the client.
///
/// By default an absent object and a failed lookup are both `ObjectLookup` (500). With
/// `separate_not_found` they become `ObjectNotFound` (404) and `StorageUnavailable` (502).
fn lookup_error(err: StorageError, object_key: &str, separate_not_found: bool) -> AppError {
    let object_key = object_key.to_string();
    match (err, separate_not_found) {
        (StorageError::NotFound(_), true) => AppError::ObjectNotFound { object_key },
        (err, true) => AppError::StorageUnavailable {
            object_key,
            message: err.to_string(),
        },
        (err, false) => AppError::ObjectLookup {
            object_key,
            message: err.to_string(),
        },
    }
}

/// Redirect to a presigned URL for downloading an existing object
///
/// The object is looked up before signing so that a missing key fails here rather than at
/// the storage URL. The redirect itself must not be cached.
#[utoipa::path(
    get,
    path = "/files/{objectKey}",
    tag = "files",
    params(
        ("objectKey" = String, Path, description = "Object key returned by POST /files, percent-encoded")
    ),
    responses(
        (status = 307, description = "Redirect to the presigned download URL"),
        (status = 400, description = "Missing path parameter", body = ErrorResponse),
        (status = 404, description = "File not found (only with SEPARATE_NOT_FOUND_STATUS)", body = ErrorResponse),
        (status = 500, description = "Error retrieving file or failed to generate download URL", body = ErrorResponse),
        (status = 502, description = "Storage backend unavailable (only with SEPARATE_NOT_FOUND_STATUS)", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_redirect"))]
pub async fn download_redirect(
    State(state): State<Arc<AppState>>,
    ObjectKeyPath(object_key): ObjectKeyPath,
) -> Result<Response, HttpAppError> {
    let info = state
        .storage
        .head(&object_key)
        .await
        .map_err(|e| lookup_error(e, &object_key, state.config.separate_not_found_status))?;

    let signing_error = |message: String| AppError::Signing {
        operation: SignedOperation::Download,
        object_key: Some(object_key.clone()),
        message,
    };

    let download_url = state
        .storage
        .presigned_get_url(&object_key, DOWNLOAD_URL_EXPIRY)
        .await
        .map_err(|e| signing_error(e.to_string()))?;

    let location = HeaderValue::from_str(&download_url)
        .map_err(|e| signing_error(format!("Presigned URL is not a valid header value: {}", e)))?;

    tracing::info!(
        size_bytes = ?info.size,
        expires_in_seconds = DOWNLOAD_URL_EXPIRY.as_secs(),
        "Download redirect issued"
    );

    Ok((
        StatusCode::TEMPORARY_REDIRECT,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
    )
        .into_response())
}

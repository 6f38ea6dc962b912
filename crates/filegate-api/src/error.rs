//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain failures are raised as
//! `AppError` and converted with `?`, so every failure path renders the same JSON body and is
//! logged at the level the error declares.

use axum::{
    body::Bytes,
    extract::rejection::PathRejection,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use filegate_core::models::UploadRequest;
use filegate_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Requested object key, present on download failures
    #[serde(rename = "objectKey", skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            recoverable: false,
            object_key: None,
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            message: err.client_message(),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
            object_key: err.object_key().map(String::from),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from filegate-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let object_key = error.object_key();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, object_key, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, object_key, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type,
                object_key,
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(ErrorResponse::from(app_error))).into_response()
    }
}

/// Upload request body extractor.
///
/// Buffers the body and parses it as JSON whatever the request `Content-Type` says, so bare
/// bodies from scripts and `fetch` calls are accepted. Failures render as our `ErrorResponse`.
#[derive(Debug)]
pub struct UploadBody(pub UploadRequest);

impl<S> FromRequest<S> for UploadBody
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                HttpAppError(AppError::PayloadTooLarge(rejection.body_text()))
            } else {
                HttpAppError(AppError::InvalidInput(format!(
                    "Failed to read request body: {}",
                    rejection.body_text()
                )))
            }
        })?;

        Ok(UploadBody(UploadRequest::from_json_body(&body)?))
    }
}

/// The `{object_key}` path segment, percent-decoded once by the router.
#[derive(Debug)]
pub struct ObjectKeyPath(pub String);

fn missing_object_key() -> HttpAppError {
    HttpAppError(AppError::InvalidInput(
        "Missing path parameter: objectKey".to_string(),
    ))
}

impl<S> FromRequestParts<S> for ObjectKeyPath
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(key)) if !key.is_empty() => Ok(ObjectKeyPath(key)),
            Ok(_) | Err(PathRejection::MissingPathParams(_)) => Err(missing_object_key()),
            Err(rejection) => Err(HttpAppError(AppError::InvalidInput(format!(
                "Invalid path parameter: {}",
                rejection.body_text()
            )))),
        }
    }
}

/// Handler for `GET /files` and `GET /files/`, which name no object.
pub async fn missing_object_key_handler() -> HttpAppError {
    missing_object_key()
}

/// JSON 404 for unmatched routes
pub async fn not_found_fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found", "NOT_FOUND")),
    )
}

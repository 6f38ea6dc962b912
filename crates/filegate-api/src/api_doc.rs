//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use filegate_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filegate API",
        version = "0.1.0",
        description = "Presigned upload and download URLs for an S3-compatible bucket. File bytes never pass through this service: clients PUT to the issued upload URL and follow the download redirect to storage."
    ),
    paths(
        handlers::upload::create_upload_url,
        handlers::download::download_redirect,
        handlers::health::liveness,
    ),
    components(
        schemas(
            models::UploadRequest,
            models::UploadResponse,
            error::ErrorResponse,
            handlers::health::LivenessResponse,
        )
    ),
    tags(
        (name = "files", description = "Presigned upload and download URLs"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
}

/// Liveness probe
///
/// Does not touch storage; a running process is alive.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse)
    )
)]
pub async fn liveness() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

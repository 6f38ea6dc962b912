//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::error::{missing_object_key_handler, not_found_fallback};
use crate::handlers;
use crate::middleware::{
    request_id_middleware, security_headers_middleware, RequestId, SecurityHeadersConfig,
    REQUEST_ID_HEADER,
};
use crate::state::AppState;
use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use filegate_core::Config;
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id
        )
    });

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(config.is_production()));

    let http_concurrency_limit = config.base.http_concurrency_limit;
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = file_routes()
        .route("/health", get(handlers::health::liveness))
        .route("/api/openapi.json", get(openapi_json))
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .fallback(not_found_fallback)
        // One semaphore shared by every route, so the limit is server-wide
        .layer(GlobalConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.base.max_request_body_bytes))
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

/// `/files` endpoints; a bare `/files` or `/files/` names no object and is rejected with 400.
fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/files",
            post(handlers::upload::create_upload_url).get(missing_object_key_handler),
        )
        .route("/files/", get(missing_object_key_handler))
        .route(
            "/files/{object_key}",
            get(handlers::download::download_redirect),
        )
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid origin in CORS_ORIGINS: {}", e))?;
        CorsLayer::new().allow_origin(origins)
    };

    Ok(cors
        .allow_methods(methods)
        .allow_headers(Any)
        .expose_headers([REQUEST_ID_HEADER]))
}

//! HTTP surface of the code review relay.
//!
//! `GET /` and `GET /health` report liveness and the configured model;
//! `POST /api/analyze` validates a snippet, runs it through
//! [`cr_llm::AnalysisService`], and maps failures to status codes.

pub mod config;
pub mod error;
pub mod routes;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Cli;
pub use error::ApiError;
pub use routes::{router, AppState};

/// Full application: routes plus CORS for `allowed_origins` and request tracing.
pub fn app(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    router(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using a wildcard.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

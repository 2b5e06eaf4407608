use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::api::handlers::{
    create_document_handler, get_document_handler, health_handler, raw_document_handler,
    readiness_handler,
};
use crate::api::middleware::request_log_middleware;
use crate::api::openapi::swagger_ui;
use crate::application::context::OperationContext;
use crate::application::ports::DocumentStore;
use crate::application::use_cases::{CreateDocumentUseCase, GetDocumentUseCase};
use crate::config::Config;

/// Room for JSON framing and escapes on top of the raw content limit
const BODY_OVERHEAD_BYTES: usize = 16 * 1024;

/// Longest JSON spelling of a single content byte (`\u0001`)
const MAX_ESCAPE_EXPANSION: usize = 6;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub create_use_case: Arc<CreateDocumentUseCase>,
    pub get_use_case: Arc<GetDocumentUseCase>,
    pub store: Arc<dyn DocumentStore>,
    pub operation_timeout: Duration,
    /// Root token; cancelled when the server gives up draining
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Fresh context for one request's store calls
    pub fn operation_context(&self) -> OperationContext {
        OperationContext::child_of(&self.shutdown, Some(self.operation_timeout))
    }
}

/// Largest request body accepted for a given content limit.
///
/// A `\u0001` escape spends six body bytes on one content byte, so content
/// at the limit fits even when fully escaped. Anything larger than that
/// still reaches the validator and gets a 400 rather than a 413.
pub fn body_limit(max_content_size: usize) -> usize {
    max_content_size
        .saturating_mul(MAX_ESCAPE_EXPANSION)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        // Documents
        .route("/", post(create_document_handler))
        .route("/{id}", get(get_document_handler))
        .route("/{id}/raw", get(raw_document_handler))
        .with_state(state)
        .merge(swagger_ui())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit(config.max_content_size)))
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(request_log_middleware))
}

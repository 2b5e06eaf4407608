use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;
use utoipa::ToSchema;

use crate::api::router::AppState;
use crate::application::context::OperationContext;

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Basic health check response
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Store readiness response
#[derive(serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
/// Liveness probe (no store check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "textbin",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /health/ready
/// Readiness probe with store connectivity check
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let start_time = Instant::now();
    let ctx = OperationContext::child_of(&state.shutdown, Some(READINESS_TIMEOUT));
    let backend = state.store.backend_name();

    let check = state.store.ping(&ctx).await;
    let response_time = start_time.elapsed();

    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "service": "textbin",
                "backend": backend,
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": response_time.as_millis(),
            })),
        ),
        Err(e) => {
            tracing::warn!(backend, error = %e, "readiness_check_failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "service": "textbin",
                    "backend": backend,
                    "error": e.to_string(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "response_time_ms": response_time.as_millis(),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::{MockDocumentStore, StoreError};
    use crate::application::use_cases::{CreateDocumentUseCase, GetDocumentUseCase};
    use crate::application::validation::RequestValidator;
    use tokio_util::sync::CancellationToken;

    fn state_with(store: MockDocumentStore) -> AppState {
        let store: Arc<dyn crate::application::ports::DocumentStore> = Arc::new(store);
        AppState {
            create_use_case: Arc::new(CreateDocumentUseCase::new(
                Arc::clone(&store),
                RequestValidator::default(),
            )),
            get_use_case: Arc::new(GetDocumentUseCase::new(Arc::clone(&store))),
            store,
            operation_timeout: Duration::from_secs(1),
            shutdown: CancellationToken::new(),
        }
    }

    #[tokio::test]
    async fn test_health_handler() {
        let (status, Json(body)) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_ok() {
        let mut store = MockDocumentStore::new();
        store.expect_backend_name().return_const("ephemeral");
        store.expect_ping().times(1).returning(|_| Ok(()));

        let (status, Json(body)) = readiness_handler(State(state_with(store))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "ephemeral");
    }

    #[tokio::test]
    async fn test_readiness_closed_store() {
        let mut store = MockDocumentStore::new();
        store.expect_backend_name().return_const("postgres");
        store
            .expect_ping()
            .times(1)
            .returning(|_| Err(StoreError::Closed));

        let (status, Json(body)) = readiness_handler(State(state_with(store))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");
    }
}

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response body: `{status, payload, error}`.
///
/// `status` repeats the HTTP status code. On success `error` is empty; on
/// failure `payload` is an empty object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub status: u16,
    pub payload: T,
    pub error: String,
}

impl<T> Envelope<T> {
    pub fn success(status: StatusCode, payload: T) -> Self {
        Self {
            status: status.as_u16(),
            payload,
            error: String::new(),
        }
    }
}

/// Payload of an error envelope, serialized as `{}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EmptyPayload {}

impl Envelope<EmptyPayload> {
    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            payload: EmptyPayload::default(),
            error: error.into(),
        }
    }
}

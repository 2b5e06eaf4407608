use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::envelope::Envelope;
use crate::application::use_cases::{CreateDocumentError, GetDocumentError};

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(Envelope::failure(self.status, self.message));
        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors.
// Store failures are logged by the use case; clients only see a generic message.

impl From<CreateDocumentError> for ApiError {
    fn from(err: CreateDocumentError) -> Self {
        match err {
            CreateDocumentError::Validation(e) => ApiError::bad_request(e.to_string()),
            CreateDocumentError::Store(_) => ApiError::internal_error("Failed to store document"),
        }
    }
}

impl From<GetDocumentError> for ApiError {
    fn from(err: GetDocumentError) -> Self {
        match err {
            GetDocumentError::InvalidId(e) => ApiError::bad_request(e.to_string()),
            GetDocumentError::NotFound(id) => {
                ApiError::not_found(format!("Document not found: {}", id))
            }
            GetDocumentError::Store(_) => ApiError::internal_error("Failed to load document"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::new(status, rejection.body_text())
    }
}

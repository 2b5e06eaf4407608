//! Error types for the document use cases

use thiserror::Error;

use crate::application::ports::StoreError;
use crate::domain::errors::DomainError;

/// Error returned by the create use case
#[derive(Debug, Error)]
pub enum CreateDocumentError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Error returned by the get use case
#[derive(Debug, Error)]
pub enum GetDocumentError {
    #[error("Invalid document ID: {0}")]
    InvalidId(#[from] DomainError),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for GetDocumentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => GetDocumentError::NotFound(id),
            other => GetDocumentError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_from_domain_error() {
        let err: CreateDocumentError = DomainError::validation("content", "empty").into();
        assert!(matches!(err, CreateDocumentError::Validation(_)));
        assert!(err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_create_error_from_store_error() {
        let err: CreateDocumentError = StoreError::Closed.into();
        assert!(matches!(err, CreateDocumentError::Store(StoreError::Closed)));
    }

    #[test]
    fn test_get_error_splits_not_found_from_store_failures() {
        let err: GetDocumentError = StoreError::NotFound("abc".to_string()).into();
        assert!(matches!(err, GetDocumentError::NotFound(ref id) if id == "abc"));

        let err: GetDocumentError = StoreError::DeadlineExceeded.into();
        assert!(matches!(
            err,
            GetDocumentError::Store(StoreError::DeadlineExceeded)
        ));
    }
}

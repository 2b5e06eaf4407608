use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid document ID: {0}")]
    InvalidDocumentId(String),

    #[error("Invalid content hash: expected {expected}, got {actual}")]
    InvalidContentHash { expected: String, actual: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

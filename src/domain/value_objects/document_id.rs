use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Longest identifier accepted from the outside world
pub const MAX_DOCUMENT_ID_LENGTH: usize = 64;

/// First path segments the HTTP router serves itself; never issued as IDs
pub const RESERVED_DOCUMENT_IDS: &[&str] = &["health", "api-docs", "swagger-ui"];

/// Short, URL-safe identifier of a stored document.
///
/// Identifiers are minted server-side by an `IdGenerator`; parsing only
/// guards lookups against malformed path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::InvalidDocumentId(
                "identifier cannot be empty".to_string(),
            ));
        }

        if value.len() > MAX_DOCUMENT_ID_LENGTH {
            return Err(DomainError::InvalidDocumentId(format!(
                "identifier longer than {} characters",
                MAX_DOCUMENT_ID_LENGTH
            )));
        }

        if !value.chars().all(is_url_safe) {
            return Err(DomainError::InvalidDocumentId(format!(
                "identifier contains characters outside [A-Za-z0-9_-]: {}",
                value
            )));
        }

        Ok(Self(value))
    }

    /// Wrap a value produced by a generator whose alphabet is already URL-safe
    pub(crate) fn from_trusted(value: String) -> Self {
        debug_assert!(value.chars().all(is_url_safe));
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this ID would be shadowed by a built-in route
    pub fn is_reserved(&self) -> bool {
        RESERVED_DOCUMENT_IDS
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(&self.0))
    }
}

/// Characters allowed in identifiers and identifier alphabets
pub fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

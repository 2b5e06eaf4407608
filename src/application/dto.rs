use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::Document;

/// DTO for create requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    /// Text to store
    pub content: String,
    /// Optional syntax hint such as `rs` or `txt`
    #[serde(default)]
    pub extension: Option<String>,
}

impl CreateDocumentRequest {
    pub fn new(content: impl Into<String>, extension: Option<&str>) -> Self {
        Self {
            content: content.into(),
            extension: extension.map(str::to_string),
        }
    }
}

/// DTO returned from a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDocumentDto {
    pub id: String,
    /// SHA-256 of the stored content, lowercase hex
    pub content_hash: String,
}

impl From<&Document> for CreatedDocumentDto {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id().to_string(),
            content_hash: doc.content_hash().to_string(),
        }
    }
}

/// DTO for document reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub id: String,
    pub content: String,
    pub extension: Option<String>,
    pub content_hash: String,
    pub created_at: String,
}

impl From<Document> for DocumentDto {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id().to_string(),
            extension: doc.extension().map(|e| e.to_string()),
            content_hash: doc.content_hash().to_string(),
            created_at: doc.created_at().to_rfc3339(),
            content: doc.content().to_string(),
        }
    }
}

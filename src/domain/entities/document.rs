use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContentHash, DocumentId, Extension};

/// Document aggregate root - a single stored paste.
///
/// There is no mutating API: a document is fixed once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    content: String,
    extension: Option<Extension>,
    content_hash: ContentHash,
    created_at: DateTime<Utc>,
}

impl Document {
    /// Create a freshly minted document
    pub fn new(
        id: DocumentId,
        content: String,
        extension: Option<Extension>,
        content_hash: ContentHash,
    ) -> Self {
        Self::reconstruct(id, content, extension, content_hash, Utc::now())
    }

    /// Reconstruct from storage (e.g., database)
    pub fn reconstruct(
        id: DocumentId,
        content: String,
        extension: Option<Extension>,
        content_hash: ContentHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            extension,
            content_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn extension(&self) -> Option<&Extension> {
        self.extension.as_ref()
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

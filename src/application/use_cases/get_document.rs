use std::sync::Arc;

use crate::application::context::OperationContext;
use crate::application::errors::GetDocumentError;
use crate::application::ports::DocumentStore;
use crate::domain::entities::Document;
use crate::domain::value_objects::DocumentId;

/// Use case: Fetch a document by ID
pub struct GetDocumentUseCase {
    store: Arc<dyn DocumentStore>,
}

impl GetDocumentUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Look up a document by its client-supplied ID
    pub async fn execute(
        &self,
        ctx: &OperationContext,
        raw_id: &str,
    ) -> Result<Document, GetDocumentError> {
        let id = DocumentId::parse(raw_id)?;

        match self.store.get(ctx, &id).await {
            Ok(document) => Ok(document),
            Err(e) if e.is_not_found() => {
                tracing::debug!(%id, "Document not found");
                Err(e.into())
            }
            Err(e) => {
                tracing::error!(%e, %id, backend = self.store.backend_name(), "Failed to load document");
                Err(e.into())
            }
        }
    }
}

use std::sync::Arc;

use crate::application::context::OperationContext;
use crate::application::dto::{CreateDocumentRequest, CreatedDocumentDto};
use crate::application::errors::CreateDocumentError;
use crate::application::ports::DocumentStore;
use crate::application::validation::RequestValidator;
use crate::domain::value_objects::Extension;

/// Use case: Create a document
pub struct CreateDocumentUseCase {
    store: Arc<dyn DocumentStore>,
    validator: RequestValidator,
}

impl CreateDocumentUseCase {
    pub fn new(store: Arc<dyn DocumentStore>, validator: RequestValidator) -> Self {
        Self { store, validator }
    }

    /// Execute create workflow
    pub async fn execute(
        &self,
        ctx: &OperationContext,
        request: CreateDocumentRequest,
    ) -> Result<CreatedDocumentDto, CreateDocumentError> {
        // 1. Validate before any ID is minted or the store is touched
        if let Err(e) = self.validator.validate(&request) {
            tracing::debug!(%e, "Rejected create request");
            return Err(e.into());
        }

        // 2. Persist; the store assigns the ID and computes the hash
        let extension = request.extension.and_then(Extension::new);
        let document = self
            .store
            .create(ctx, request.content, extension)
            .await
            .map_err(|e| {
                tracing::error!(%e, backend = self.store.backend_name(), "Failed to create document");
                e
            })?;

        tracing::info!(
            id = %document.id(),
            size_bytes = document.size_bytes(),
            "document_created"
        );

        Ok(CreatedDocumentDto::from(&document))
    }
}

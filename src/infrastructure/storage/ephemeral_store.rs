use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::application::context::OperationContext;
use crate::application::ports::{DocumentStore, IdGenerator, StoreError};
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentId, Extension};
use crate::infrastructure::identifiers::insert_with_fresh_id;
use crate::infrastructure::storage::ContentHasher;

/// Process-local document store.
///
/// Documents live in a sharded concurrent map and vanish with the process.
/// Each insert goes through the map's entry API so the "is this ID free"
/// check and the write happen under the same shard lock.
pub struct EphemeralDocumentStore {
    documents: DashMap<DocumentId, Document>,
    id_generator: Arc<dyn IdGenerator>,
    max_id_attempts: u32,
    closed: AtomicBool,
}

impl EphemeralDocumentStore {
    pub fn new(id_generator: Arc<dyn IdGenerator>, max_id_attempts: u32) -> Self {
        Self {
            documents: DashMap::new(),
            id_generator,
            max_id_attempts: max_id_attempts.max(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    /// The closed flag is re-read while the shard lock is held: `close` sets
    /// the flag before clearing, so an insert either lands before the clear
    /// reaches this shard or observes the flag and backs out.
    fn insert(&self, document: Document) -> Result<Document, StoreError> {
        match self.documents.entry(document.id().clone()) {
            Entry::Occupied(_) => Err(StoreError::Collision(document.id().clone())),
            Entry::Vacant(slot) => {
                self.ensure_open()?;
                slot.insert(document.clone());
                Ok(document)
            }
        }
    }
}

#[async_trait]
impl DocumentStore for EphemeralDocumentStore {
    fn backend_name(&self) -> &'static str {
        "ephemeral"
    }

    async fn create(
        &self,
        ctx: &OperationContext,
        content: String,
        extension: Option<Extension>,
    ) -> Result<Document, StoreError> {
        self.ensure_open()?;
        ctx.check()?;

        let content_hash = ContentHasher::hash(content.as_bytes());

        insert_with_fresh_id(self.id_generator.as_ref(), self.max_id_attempts, |id| {
            let document = Document::new(
                id,
                content.clone(),
                extension.clone(),
                content_hash.clone(),
            );
            std::future::ready(self.insert(document))
        })
        .await
    }

    async fn get(&self, ctx: &OperationContext, id: &DocumentId) -> Result<Document, StoreError> {
        self.ensure_open()?;
        ctx.check()?;

        self.documents
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn migrate(&self, _ctx: &OperationContext) -> Result<(), StoreError> {
        debug!("Ephemeral store needs no migration");
        Ok(())
    }

    async fn ping(&self, _ctx: &OperationContext) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) -> Result<(), StoreError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            let dropped = self.documents.len();
            self.documents.clear();
            info!(dropped, "Ephemeral store closed");
        }
        Ok(())
    }
}

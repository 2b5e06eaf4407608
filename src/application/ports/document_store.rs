use async_trait::async_trait;
use thiserror::Error;

use crate::application::context::OperationContext;
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentId, Extension};
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A freshly generated ID is already taken. Retried inside `create`.
    #[error("Document ID already in use: {0}")]
    Collision(DocumentId),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Document store is closed")]
    Closed,

    #[error("Operation deadline exceeded")]
    DeadlineExceeded,

    #[error("Operation cancelled")]
    Cancelled,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed => StoreError::Closed,
            other => StoreError::Database(other),
        }
    }
}

/// Port for document persistence.
///
/// Implementations must be safe to call concurrently from many request tasks
/// without outside synchronization.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend label used in logs and readiness output
    fn backend_name(&self) -> &'static str;

    /// Persist a new document under a freshly generated ID.
    ///
    /// ID collisions are retried internally; callers only see
    /// `StoreError::Persistence` once the retry budget is spent.
    async fn create(
        &self,
        ctx: &OperationContext,
        content: String,
        extension: Option<Extension>,
    ) -> Result<Document, StoreError>;

    /// Fetch a document exactly as it was created
    async fn get(&self, ctx: &OperationContext, id: &DocumentId) -> Result<Document, StoreError>;

    /// Prepare backing structures. Idempotent; a no-op for in-memory stores.
    async fn migrate(&self, ctx: &OperationContext) -> Result<(), StoreError>;

    /// Cheap reachability probe for readiness checks
    async fn ping(&self, ctx: &OperationContext) -> Result<(), StoreError>;

    /// Release backend resources. Later calls fail with `StoreError::Closed`.
    async fn close(&self) -> Result<(), StoreError>;
}

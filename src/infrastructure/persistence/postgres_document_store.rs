use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

use crate::application::context::OperationContext;
use crate::application::ports::{DocumentStore, IdGenerator, StoreError};
use crate::domain::entities::Document;
use crate::domain::value_objects::{ContentHash, DocumentId, Extension};
use crate::infrastructure::identifiers::insert_with_fresh_id;
use crate::infrastructure::storage::ContentHasher;

/// Embedded schema migrations. Applied versions are recorded in
/// `_sqlx_migrations`, so re-running is a no-op.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLSTATE for "relation does not exist"
const UNDEFINED_TABLE: &str = "42P01";

/// Versions recorded in the migration ledger.
///
/// A database that was never migrated has no ledger table and yields an
/// empty set. Every other failure is returned to the caller.
pub async fn applied_migrations(pool: &PgPool) -> Result<HashSet<i64>, sqlx::Error> {
    match sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations")
        .fetch_all(pool)
        .await
    {
        Ok(versions) => Ok(versions.into_iter().collect()),
        Err(e) if is_undefined_table(&e) => Ok(HashSet::new()),
        Err(e) => Err(e),
    }
}

fn is_undefined_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNDEFINED_TABLE),
        _ => false,
    }
}

/// Durable document store backed by PostgreSQL.
///
/// Every statement runs directly against the pool, so a connection is only
/// held for the duration of one query and is returned on every exit path.
pub struct PostgresDocumentStore {
    pool: PgPool,
    id_generator: Arc<dyn IdGenerator>,
    max_id_attempts: u32,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool, id_generator: Arc<dyn IdGenerator>, max_id_attempts: u32) -> Self {
        Self {
            pool,
            id_generator,
            max_id_attempts: max_id_attempts.max(1),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    /// Single-statement insert: either the whole row lands or nothing does.
    /// No returned row means the ID already exists.
    async fn insert(&self, document: Document) -> Result<Document, StoreError> {
        let inserted: Option<String> = sqlx::query_scalar(
            r#"
            INSERT INTO documents (id, content, extension, content_hash, size_bytes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(document.id().as_str())
        .bind(document.content())
        .bind(document.extension().map(|e| e.as_str()))
        .bind(document.content_hash().as_hex())
        .bind(document.size_bytes() as i64)
        .bind(document.created_at())
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(_) => Ok(document),
            None => Err(StoreError::Collision(document.id().clone())),
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(
        &self,
        ctx: &OperationContext,
        content: String,
        extension: Option<Extension>,
    ) -> Result<Document, StoreError> {
        self.ensure_open()?;

        let content_hash = ContentHasher::hash(content.as_bytes());
        let store = self;

        ctx.run(insert_with_fresh_id(
            self.id_generator.as_ref(),
            self.max_id_attempts,
            move |id| {
                let document = Document::new(
                    id,
                    content.clone(),
                    extension.clone(),
                    content_hash.clone(),
                );
                store.insert(document)
            },
        ))
        .await
    }

    async fn get(&self, ctx: &OperationContext, id: &DocumentId) -> Result<Document, StoreError> {
        self.ensure_open()?;

        let row = ctx
            .run(async {
                sqlx::query_as::<_, DocumentRow>(
                    r#"
                    SELECT id, content, extension, content_hash, created_at
                    FROM documents
                    WHERE id = $1
                    "#,
                )
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::from)
            })
            .await?;

        match row {
            Some(r) => r.into_domain(),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn migrate(&self, ctx: &OperationContext) -> Result<(), StoreError> {
        self.ensure_open()?;

        info!("Running database migrations");
        ctx.run(async { MIGRATOR.run(&self.pool).await.map_err(StoreError::from) })
            .await?;
        info!("Database schema is up to date");

        Ok(())
    }

    async fn ping(&self, ctx: &OperationContext) -> Result<(), StoreError> {
        self.ensure_open()?;

        ctx.run(async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(StoreError::from)
        })
        .await
    }

    async fn close(&self) -> Result<(), StoreError> {
        // Waits for checked-out connections to come back before returning
        self.pool.close().await;
        info!("PostgreSQL pool closed");
        Ok(())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    content: String,
    extension: Option<String>,
    content_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl DocumentRow {
    fn into_domain(self) -> Result<Document, StoreError> {
        let id = DocumentId::parse(self.id)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let content_hash = ContentHash::from_hex(self.content_hash)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        Ok(Document::reconstruct(
            id,
            self.content,
            self.extension.and_then(Extension::new),
            content_hash,
            self.created_at,
        ))
    }
}

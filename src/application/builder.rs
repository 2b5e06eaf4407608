use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    context::OperationContext,
    ports::{DocumentStore, IdGenerator},
    use_cases::{CreateDocumentUseCase, GetDocumentUseCase},
    validation::{RequestValidator, ValidationConfig},
};
use crate::config::{Config, StoreBackend};
use crate::infrastructure::{
    identifiers::RandomIdGenerator, persistence::PostgresDocumentStore,
    storage::EphemeralDocumentStore,
};

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Open the configured backend and bring its schema up to date.
    ///
    /// Any failure here is fatal: the server must not start serving traffic
    /// against a store it could not reach or migrate.
    pub async fn with_store(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let id_generator: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator::new(
            self.config.id_length,
            &self.config.id_alphabet,
        )?);
        let attempts = self.config.id_collision_retries;

        let store: Arc<dyn DocumentStore> = match self.config.store_backend {
            StoreBackend::Ephemeral => {
                info!("Using ephemeral in-memory document store");
                Arc::new(EphemeralDocumentStore::new(id_generator, attempts))
            }
            StoreBackend::Postgres => {
                let pool = self.connect_postgres().await?;
                Arc::new(PostgresDocumentStore::new(pool, id_generator, attempts))
            }
        };

        info!(backend = store.backend_name(), "Running document store migrations");
        store
            .migrate(&OperationContext::background())
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.store = Some(store);
        Ok(self)
    }

    /// Use an already constructed store (tests, embedding)
    pub fn with_document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Initialize database connection pool with retry logic
    async fn connect_postgres(&self) -> Result<sqlx::PgPool, Box<dyn std::error::Error>> {
        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = self.config.db_connect_retries;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        Ok(pool)
    }

    /// Build application state with all use cases.
    ///
    /// `shutdown` is the root token every request context is derived from.
    pub fn build(
        self,
        shutdown: CancellationToken,
    ) -> Result<AppState, Box<dyn std::error::Error>> {
        let store = self.store.ok_or("Document store not initialized")?;
        let validator = RequestValidator::new(ValidationConfig::from(&self.config));

        let create_use_case = Arc::new(CreateDocumentUseCase::new(
            Arc::clone(&store),
            validator,
        ));
        let get_use_case = Arc::new(GetDocumentUseCase::new(Arc::clone(&store)));

        info!("Application layer initialized");

        Ok(AppState {
            create_use_case,
            get_use_case,
            store,
            operation_timeout: Duration::from_secs(self.config.operation_timeout_secs),
            shutdown,
        })
    }

    pub fn store(&self) -> Option<Arc<dyn DocumentStore>> {
        self.store.clone()
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

mod postgres_document_store;

pub use postgres_document_store::{applied_migrations, PostgresDocumentStore, MIGRATOR};

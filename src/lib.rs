//! # textbin - Text Paste Storage
//!
//! Stores short text documents under generated, URL-safe IDs and returns a
//! SHA-256 content hash for each. Built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core types (document entity, value objects, domain errors)
//! - **Application**: Use cases, ports (`DocumentStore`, `IdGenerator`) and validation
//! - **Infrastructure**: Ephemeral and PostgreSQL stores, ID generation, hashing
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use textbin::{
//!     application::context::OperationContext,
//!     infrastructure::{identifiers::RandomIdGenerator, storage::EphemeralDocumentStore},
//!     ports::DocumentStore,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = EphemeralDocumentStore::new(Arc::new(RandomIdGenerator::default()), 5);
//! let ctx = OperationContext::background();
//! let doc = store.create(&ctx, "hello world".to_string(), None).await?;
//! assert_eq!(store.get(&ctx, doc.id()).await?.content(), "hello world");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::{Config, StoreBackend};
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};

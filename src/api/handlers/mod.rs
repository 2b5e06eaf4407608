pub mod documents;
pub mod health;

pub use documents::{create_document_handler, get_document_handler, raw_document_handler};
pub use health::{health_handler, readiness_handler};

mod create_document;
mod get_document;

pub use crate::application::errors::{CreateDocumentError, GetDocumentError};
pub use create_document::CreateDocumentUseCase;
pub use get_document::GetDocumentUseCase;

mod content_hash;
mod document_id;
mod extension;

pub use content_hash::ContentHash;
pub use document_id::{is_url_safe, DocumentId, MAX_DOCUMENT_ID_LENGTH, RESERVED_DOCUMENT_IDS};
pub use extension::Extension;

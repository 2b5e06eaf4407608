mod content_hasher;
mod ephemeral_store;

pub use content_hasher::ContentHasher;
pub use ephemeral_store::EphemeralDocumentStore;

mod document_store;
mod id_generator;

pub use document_store::{DocumentStore, StoreError};
pub use id_generator::IdGenerator;

#[cfg(test)]
pub use document_store::MockDocumentStore;
#[cfg(test)]
pub use id_generator::MockIdGenerator;

use crate::domain::value_objects::DocumentId;
#[cfg(test)]
use mockall::automock;

/// Port for minting document identifiers.
///
/// Uniqueness is probabilistic; stores detect collisions on insert.
#[cfg_attr(test, automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> DocumentId;
}

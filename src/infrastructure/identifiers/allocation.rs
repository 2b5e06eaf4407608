use std::future::Future;

use tracing::{error, warn};

use crate::application::ports::{IdGenerator, StoreError};
use crate::domain::entities::Document;
use crate::domain::value_objects::DocumentId;

/// Insert a document under freshly generated IDs until one is free.
///
/// `insert` must be atomic with respect to the ID check and return
/// `StoreError::Collision` when the ID is taken. IDs that collide with
/// built-in routes are skipped without calling `insert`. Any other outcome is
/// returned as-is. Running out of attempts is a persistence failure.
pub async fn insert_with_fresh_id<F, Fut>(
    generator: &dyn IdGenerator,
    max_attempts: u32,
    mut insert: F,
) -> Result<Document, StoreError>
where
    F: FnMut(DocumentId) -> Fut,
    Fut: Future<Output = Result<Document, StoreError>>,
{
    for attempt in 1..=max_attempts {
        let id = generator.generate();
        if id.is_reserved() {
            warn!(%id, attempt, max_attempts, "Generated a reserved document ID, regenerating");
            continue;
        }

        match insert(id).await {
            Err(StoreError::Collision(id)) => {
                warn!(%id, attempt, max_attempts, "Document ID collision, regenerating");
            }
            other => return other,
        }
    }

    error!(max_attempts, "Exhausted document ID allocation attempts");
    Err(StoreError::Persistence(format!(
        "could not allocate a unique document ID after {} attempts",
        max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockIdGenerator;
    use crate::domain::value_objects::ContentHash;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn doc(id: DocumentId) -> Document {
        Document::new(
            id,
            "x".to_string(),
            None,
            ContentHash::from_hex("0".repeat(64)).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_retries_until_free_id() {
        let mut generator = MockIdGenerator::new();
        let counter = AtomicU32::new(0);
        generator.expect_generate().times(3).returning(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            DocumentId::parse(format!("id{}", n)).unwrap()
        });

        let result = insert_with_fresh_id(&generator, 5, |id| async move {
            if id.as_str() == "id2" {
                Ok(doc(id))
            } else {
                Err(StoreError::Collision(id))
            }
        })
        .await
        .unwrap();

        assert_eq!(result.id().as_str(), "id2");
    }

    #[tokio::test]
    async fn test_exhaustion_is_persistence_error() {
        let mut generator = MockIdGenerator::new();
        generator
            .expect_generate()
            .times(3)
            .returning(|| DocumentId::parse("taken").unwrap());

        let result =
            insert_with_fresh_id(&generator, 3, |id| async move { Err(StoreError::Collision(id)) })
                .await;

        assert!(matches!(result, Err(StoreError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let mut generator = MockIdGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|| DocumentId::parse("abc").unwrap());

        let result =
            insert_with_fresh_id(&generator, 5, |_| async { Err(StoreError::Closed) }).await;

        assert!(matches!(result, Err(StoreError::Closed)));
    }

    #[tokio::test]
    async fn test_reserved_ids_are_skipped() {
        let mut generator = MockIdGenerator::new();
        let mut seq = mockall::Sequence::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| DocumentId::parse("health").unwrap());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| DocumentId::parse("abcdef").unwrap());

        let inserted = AtomicU32::new(0);
        let result = insert_with_fresh_id(&generator, 5, |id| {
            inserted.fetch_add(1, Ordering::SeqCst);
            async move { Ok(doc(id)) }
        })
        .await
        .unwrap();

        assert_eq!(result.id().as_str(), "abcdef");
        assert_eq!(inserted.load(Ordering::SeqCst), 1);
    }
}

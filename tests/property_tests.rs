//! Property-based tests using proptest
//!
//! Random inputs for the invariants that should hold for any document:
//! stored content round-trips, hashes are deterministic, and the validator
//! is the only gate in front of the store.

use proptest::prelude::*;
use std::sync::Arc;

use textbin::application::context::OperationContext;
use textbin::application::dto::CreateDocumentRequest;
use textbin::application::ports::{DocumentStore, IdGenerator};
use textbin::application::use_cases::{CreateDocumentError, CreateDocumentUseCase};
use textbin::application::validation::{RequestValidator, ValidationConfig};
use textbin::domain::value_objects::{ContentHash, DocumentId};
use textbin::infrastructure::identifiers::RandomIdGenerator;
use textbin::infrastructure::storage::{ContentHasher, EphemeralDocumentStore};

/// Strategy for non-blank document content, including multi-byte text and
/// control characters (NUL among them)
fn content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \n\t{}();:é日本語🚀\\x00\\x01\\x1b]{0,200}"
        .prop_filter("content must not be blank", |s| !s.trim().is_empty())
}

/// Strategy for valid strict-mode extensions
fn extension_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[a-zA-Z0-9]{1,16}".prop_map(Some)]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_stored_content_round_trips(content in content_strategy(), ext in extension_strategy()) {
        let rt = runtime();
        let store = Arc::new(EphemeralDocumentStore::new(Arc::new(RandomIdGenerator::default()), 5));
        let use_case = CreateDocumentUseCase::new(store.clone(), RequestValidator::default());
        let ctx = OperationContext::background();

        let request = CreateDocumentRequest::new(content.clone(), ext.as_deref());
        let outcome = rt.block_on(async {
            match use_case.execute(&ctx, request).await {
                Ok(created) => {
                    let id = DocumentId::parse(created.id.clone()).unwrap();
                    let first = store.get(&ctx, &id).await.unwrap();
                    let second = store.get(&ctx, &id).await.unwrap();
                    Ok((created, first, second))
                }
                Err(e) => Err(e),
            }
        });

        if content.contains('\0') {
            // refused up front so both backends agree; nothing is stored
            prop_assert!(matches!(outcome, Err(CreateDocumentError::Validation(_))));
            prop_assert!(store.is_empty());
        } else {
            let (created, fetched, again) = outcome.unwrap();
            prop_assert_eq!(fetched.content(), content.as_str());
            prop_assert_eq!(again.content().as_bytes(), fetched.content().as_bytes());
            prop_assert_eq!(fetched.extension().map(|e| e.as_str()), ext.as_deref());
            prop_assert_eq!(fetched.content_hash().as_hex(), created.content_hash.as_str());
            prop_assert!(ContentHasher::verify(content.as_bytes(), fetched.content_hash()));
        }
    }

    #[test]
    fn prop_hash_is_deterministic_lowercase_hex(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let a = ContentHasher::hash(&data);
        let b = ContentHasher::hash(&data);

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.as_hex().len(), 64);
        prop_assert!(a.as_hex().chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert!(ContentHash::from_hex(a.as_hex().to_string()).is_ok());
    }

    #[test]
    fn prop_chunked_hash_matches_whole(data in proptest::collection::vec(any::<u8>(), 0..4096), chunk in 1usize..512) {
        prop_assert_eq!(ContentHasher::hash(&data), ContentHasher::hash_chunks(data.chunks(chunk)));
    }

    #[test]
    fn prop_generated_ids_are_valid(length in 4usize..=64) {
        let generator = RandomIdGenerator::new(length, "abcdefghijklmnopqrstuvwxyz0123456789").unwrap();
        let id = generator.generate();

        prop_assert_eq!(id.as_str().chars().count(), length);
        prop_assert!(DocumentId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn prop_validator_enforces_byte_limit(len in 1usize..300, limit in 1usize..300) {
        let validator = RequestValidator::new(ValidationConfig {
            max_content_size: limit,
            ..ValidationConfig::default()
        });
        let request = CreateDocumentRequest::new("a".repeat(len), None);

        prop_assert_eq!(validator.validate(&request).is_ok(), len <= limit);
    }

    #[test]
    fn prop_blank_content_is_always_rejected(blank in "[ \t\n\r]{0,50}") {
        let validator = RequestValidator::default();
        let request = CreateDocumentRequest::new(blank, None);
        prop_assert!(validator.validate(&request).is_err());
    }

    #[test]
    fn prop_url_unsafe_ids_are_rejected(prefix in "[a-z]{1,8}", bad in "[/?#% .]") {
        let raw = format!("{}{}", prefix, bad);
        prop_assert!(DocumentId::parse(raw).is_err());
    }
}

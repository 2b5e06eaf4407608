use sha2::{Digest, Sha256};

use crate::domain::value_objects::ContentHash;

/// Utility for computing SHA-256 content hashes.
///
/// The digest is returned to clients on create so they can confirm the
/// server stored exactly what they sent. It is never used for lookup or
/// deduplication: identical content under two IDs yields two documents with
/// the same hash.
///
/// SIMD acceleration comes from the `sha2` crate's `asm` feature.
pub struct ContentHasher;

impl ContentHasher {
    /// Compute the SHA-256 digest of `content` (64 lowercase hex characters)
    pub fn hash(content: &[u8]) -> ContentHash {
        ContentHash::from_digest(Sha256::digest(content).into())
    }

    /// Hash content delivered in several pieces without concatenating it first
    pub fn hash_chunks<'a>(chunks: impl IntoIterator<Item = &'a [u8]>) -> ContentHash {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        ContentHash::from_digest(hasher.finalize().into())
    }

    /// Check `content` against a previously issued digest
    pub fn verify(content: &[u8], expected: &ContentHash) -> bool {
        Self::hash(content) == *expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_matches_known_vector() {
        let hash = ContentHasher::hash(b"hello world");
        assert_eq!(
            hash.as_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash_of_empty_input() {
        let hash = ContentHasher::hash(b"");
        assert_eq!(
            hash.as_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_is_deterministic() {
        let content = "some paste\nwith lines\n".as_bytes();
        assert_eq!(ContentHasher::hash(content), ContentHasher::hash(content));
    }

    #[test]
    fn test_chunked_hash_equals_whole_hash() {
        let whole = ContentHasher::hash(b"hello world");
        let chunked = ContentHasher::hash_chunks([b"hello".as_slice(), b" ", b"world"]);
        assert_eq!(whole, chunked);
    }

    #[test]
    fn test_verify() {
        let hash = ContentHasher::hash(b"payload");
        assert!(ContentHasher::verify(b"payload", &hash));
        assert!(!ContentHasher::verify(b"payload!", &hash));
    }
}

use rand::Rng;

use crate::application::ports::IdGenerator;
use crate::domain::value_objects::{is_url_safe, DocumentId, MAX_DOCUMENT_ID_LENGTH};

/// Default alphabet: ASCII letters and digits
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random fixed-length identifiers over a URL-safe alphabet.
///
/// With the default 62-symbol alphabet and 8 characters the space is
/// 62^8 (about 2.2e14) identifiers.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
    alphabet: Vec<char>,
}

impl RandomIdGenerator {
    pub fn new(length: usize, alphabet: &str) -> Result<Self, String> {
        if length == 0 || length > MAX_DOCUMENT_ID_LENGTH {
            return Err(format!(
                "ID length must be between 1 and {}, got {}",
                MAX_DOCUMENT_ID_LENGTH, length
            ));
        }

        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.len() < 2 {
            return Err("ID alphabet needs at least two symbols".to_string());
        }
        if let Some(c) = alphabet.iter().find(|c| !is_url_safe(**c)) {
            return Err(format!("ID alphabet contains non URL-safe symbol {:?}", c));
        }
        let mut sorted = alphabet.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != alphabet.len() {
            return Err("ID alphabet contains duplicate symbols".to_string());
        }

        Ok(Self { length, alphabet })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn random_string(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self {
            length: 8,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> DocumentId {
        // Alphabet and length are checked in `new`
        DocumentId::from_trusted(self.random_string())
    }
}

mod allocation;
mod random_id_generator;

pub use allocation::insert_with_fresh_id;
pub use random_id_generator::{RandomIdGenerator, DEFAULT_ALPHABET};

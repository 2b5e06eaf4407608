pub mod identifiers;
pub mod persistence;
pub mod storage;

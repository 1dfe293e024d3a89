//! Service layer for the two REST façades.
//! - `books`: document-store backed book collection with per-request sessions.
//! - `people`: in-memory person list owned by an injectable store.

pub mod errors;
pub mod books;
pub mod people;
#[cfg(test)]
pub mod test_support;

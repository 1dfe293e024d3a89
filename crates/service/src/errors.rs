use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Outcome classes of a single book store operation.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("book not found: {0}")]
    NotFound(String),
    #[error("a book with ISBN {0:?} already exists")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(#[source] DbErr),
}

impl BookError {
    /// Classify a store error raised while writing the book keyed by `isbn`.
    pub fn from_db(err: DbErr, isbn: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(isbn.to_string()),
            _ => Self::Db(err),
        }
    }
}

impl From<DbErr> for BookError {
    fn from(err: DbErr) -> Self {
        Self::Db(err)
    }
}

use configs::DatabaseConfig;
use models::{db, errors::ModelError};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::BookSession;

/// Owner of the long-lived store connection pool.
///
/// Cloning is cheap and shares the same pool.
#[derive(Clone)]
pub struct ConnectionManager {
    db: DatabaseConnection,
}

impl ConnectionManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, ModelError> {
        Ok(Self::new(db::connect_with_config(cfg).await?))
    }

    /// Declare the `books` collection and its unique, sparse ISBN index.
    ///
    /// Idempotent. Must succeed before any request is served.
    pub async fn ensure_index(&self) -> Result<(), ModelError> {
        db::migrate(&self.db).await?;
        info!(collection = "books", index = "isbn", "unique index ensured");
        Ok(())
    }

    /// Borrow an independent session for one request.
    pub fn session(&self) -> BookSession {
        BookSession::new(self.db.clone())
    }

    pub async fn close(self) -> Result<(), ModelError> {
        self.db.close().await?;
        Ok(())
    }
}

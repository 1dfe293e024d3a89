use models::book;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::debug;
use uuid::Uuid;

use super::Book;
use crate::errors::BookError;

/// Per-request lease on the shared pool.
///
/// Each operation checks a connection out of the pool and returns it when the
/// statement completes. Dropping the session ends the lease.
pub struct BookSession {
    id: Uuid,
    db: DatabaseConnection,
}

impl BookSession {
    pub(super) fn new(db: DatabaseConnection) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "book session acquired");
        Self { id, db }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// All stored books in whatever order the store yields them.
    pub async fn list(&self) -> Result<Vec<Book>, BookError> {
        let rows = book::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    pub async fn count(&self) -> Result<u64, BookError> {
        Ok(book::Entity::find().count(&self.db).await?)
    }

    pub async fn insert(&self, b: &Book) -> Result<(), BookError> {
        book::Entity::insert(b.to_new_document())
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| BookError::from_db(e, &b.isbn))?;
        Ok(())
    }

    pub async fn find_by_isbn(&self, isbn: &str) -> Result<Book, BookError> {
        let found = book::Entity::find()
            .filter(book::Column::Isbn.eq(isbn))
            .one(&self.db)
            .await?
            .map(Book::from)
            .unwrap_or_default();
        if !found.is_found() {
            return Err(BookError::NotFound(isbn.to_string()));
        }
        Ok(found)
    }

    /// Replace the document stored under `isbn` with `b`. The stored key becomes
    /// `b.isbn`, which may differ from `isbn`.
    pub async fn replace(&self, isbn: &str, b: &Book) -> Result<(), BookError> {
        let res = book::Entity::update_many()
            .set(b.to_replacement())
            .filter(book::Column::Isbn.eq(isbn))
            .exec(&self.db)
            .await
            .map_err(|e| BookError::from_db(e, &b.isbn))?;
        if res.rows_affected == 0 {
            return Err(BookError::NotFound(isbn.to_string()));
        }
        Ok(())
    }

    pub async fn remove(&self, isbn: &str) -> Result<(), BookError> {
        let res = book::Entity::delete_many()
            .filter(book::Column::Isbn.eq(isbn))
            .exec(&self.db)
            .await
            .map_err(|e| BookError::from_db(e, isbn))?;
        if res.rows_affected == 0 {
            return Err(BookError::NotFound(isbn.to_string()));
        }
        Ok(())
    }
}

impl Drop for BookSession {
    fn drop(&mut self) {
        debug!(session = %self.id, "book session released");
    }
}

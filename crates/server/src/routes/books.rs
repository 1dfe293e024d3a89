use std::fmt::Display;

use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::Response,
};
use service::{
    books::{Book, ConnectionManager},
    errors::BookError,
};
use tracing::{error, info};

use crate::{
    errors::JsonApiError,
    extract::JsonBody,
    response::{created, empty, json_pretty},
};

pub const DUPLICATE_ISBN: &str = "a book with this ISBN already exists in the database";
pub const BOOK_NOT_FOUND: &str = "book not found";
pub const DATABASE_ERROR: &str = "database error";

/// Infrastructure failure: full detail stays in the log, the client gets a generic 500.
fn database_error(op: &'static str, err: impl Display) -> JsonApiError {
    error!(op, error = %err, "book store operation failed");
    JsonApiError::internal(DATABASE_ERROR)
}

/// GET /books
pub async fn list_books(State(manager): State<ConnectionManager>) -> Result<Response, JsonApiError> {
    let session = manager.session();
    match session.list().await {
        Ok(books) => {
            info!(count = books.len(), "list books");
            Ok(json_pretty(StatusCode::OK, &books))
        }
        Err(e) => Err(database_error("list", e)),
    }
}

/// PUT /books
pub async fn create_book(
    State(manager): State<ConnectionManager>,
    OriginalUri(uri): OriginalUri,
    JsonBody(book): JsonBody<Book>,
) -> Result<Response, JsonApiError> {
    let session = manager.session();
    match session.insert(&book).await {
        Ok(()) => {
            info!(isbn = %book.isbn, "created book");
            Ok(created(&format!("{}/{}", uri.path(), book.isbn)))
        }
        Err(BookError::Conflict(_)) => Err(JsonApiError::bad_request(DUPLICATE_ISBN)),
        Err(e @ (BookError::NotFound(_) | BookError::Db(_))) => Err(database_error("insert", e)),
    }
}

/// GET /books/:isbn
pub async fn get_book(
    State(manager): State<ConnectionManager>,
    Path(isbn): Path<String>,
) -> Result<Response, JsonApiError> {
    let session = manager.session();
    match session.find_by_isbn(&isbn).await {
        Ok(book) => Ok(json_pretty(StatusCode::OK, &book)),
        Err(BookError::NotFound(_)) => Err(JsonApiError::not_found(BOOK_NOT_FOUND)),
        Err(e @ (BookError::Conflict(_) | BookError::Db(_))) => Err(database_error("find", e)),
    }
}

/// PUT /books/:isbn
///
/// Whole-document replacement. The stored key afterwards is the body's `isbn`.
pub async fn update_book(
    State(manager): State<ConnectionManager>,
    Path(isbn): Path<String>,
    JsonBody(book): JsonBody<Book>,
) -> Result<Response, JsonApiError> {
    let session = manager.session();
    match session.replace(&isbn, &book).await {
        Ok(()) => {
            info!(%isbn, new_isbn = %book.isbn, "updated book");
            Ok(empty(StatusCode::NO_CONTENT))
        }
        Err(BookError::NotFound(_)) => Err(JsonApiError::not_found(BOOK_NOT_FOUND)),
        // only create treats a taken key as a client error
        Err(e @ (BookError::Conflict(_) | BookError::Db(_))) => Err(database_error("update", e)),
    }
}

/// DELETE /books/:isbn
pub async fn delete_book(
    State(manager): State<ConnectionManager>,
    Path(isbn): Path<String>,
) -> Result<Response, JsonApiError> {
    let session = manager.session();
    match session.remove(&isbn).await {
        Ok(()) => {
            info!(%isbn, "deleted book");
            Ok(empty(StatusCode::NO_CONTENT))
        }
        Err(BookError::NotFound(_)) => Err(JsonApiError::not_found(BOOK_NOT_FOUND)),
        Err(e @ (BookError::Conflict(_) | BookError::Db(_))) => Err(database_error("delete", e)),
    }
}

//! Book collection backed by the document store.
//!
//! [`ConnectionManager`] owns the pooled connection and hands out one
//! [`BookSession`] per request; every store operation goes through a session.

mod manager;
mod session;

pub use manager::ConnectionManager;
pub use session::BookSession;

use models::book::{self, stored_isbn, Authors};
use sea_orm::{prelude::Uuid, Set};
use serde::{Deserialize, Serialize};

/// A book as exchanged over HTTP. Missing fields decode to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub authors: Vec<String>,
    pub price: String,
}

impl Book {
    /// A lookup only counts as a hit when it produced a non-empty ISBN.
    pub fn is_found(&self) -> bool {
        !self.isbn.is_empty()
    }

    /// Full document for a fresh insert.
    fn to_new_document(&self) -> book::ActiveModel {
        book::ActiveModel {
            id: Set(Uuid::new_v4()),
            ..self.to_replacement()
        }
    }

    /// Every field except the document id, for wholesale replacement.
    fn to_replacement(&self) -> book::ActiveModel {
        book::ActiveModel {
            isbn: Set(stored_isbn(&self.isbn)),
            title: Set(self.title.clone()),
            authors: Set(Authors(self.authors.clone())),
            price: Set(self.price.clone()),
            ..Default::default()
        }
    }
}

impl From<book::Model> for Book {
    fn from(m: book::Model) -> Self {
        Self {
            isbn: m.isbn.unwrap_or_default(),
            title: m.title,
            authors: m.authors.0,
            price: m.price,
        }
    }
}

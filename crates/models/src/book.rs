//! `books` entity: one row per stored book document.

use sea_orm::{entity::prelude::*, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// `None` for documents stored without an ISBN.
    pub isbn: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Json")]
    pub authors: Authors,
    pub price: String,
}

/// Ordered author list stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Authors(pub Vec<String>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Map an ISBN to its stored form: empty strings are kept out of the index.
pub fn stored_isbn(isbn: &str) -> Option<String> {
    if isbn.is_empty() {
        None
    } else {
        Some(isbn.to_string())
    }
}

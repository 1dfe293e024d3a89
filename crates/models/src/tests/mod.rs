use configs::DatabaseConfig;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::book::{self, stored_isbn, Authors};
use crate::db;

fn row(isbn: &str, title: &str) -> book::ActiveModel {
    book::ActiveModel {
        id: Set(Uuid::new_v4()),
        isbn: Set(stored_isbn(isbn)),
        title: Set(title.to_string()),
        authors: Set(Authors(vec!["Ann".into(), "Bob".into()])),
        price: Set("12.50".into()),
    }
}

#[test]
fn empty_isbn_is_not_stored() {
    assert_eq!(stored_isbn(""), None);
    assert_eq!(stored_isbn("111"), Some("111".to_string()));
}

#[tokio::test]
async fn migrate_is_idempotent_and_roundtrips_authors() -> anyhow::Result<()> {
    let conn = db::connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    db::migrate(&conn).await?;
    db::migrate(&conn).await?;

    row("111", "Rust").insert(&conn).await?;
    let found = book::Entity::find()
        .filter(book::Column::Isbn.eq("111"))
        .one(&conn)
        .await?
        .expect("row stored");
    assert_eq!(found.title, "Rust");
    assert_eq!(found.authors, Authors(vec!["Ann".into(), "Bob".into()]));
    assert_eq!(found.price, "12.50");
    Ok(())
}

#[tokio::test]
async fn unique_index_rejects_duplicate_isbn_but_not_missing_ones() -> anyhow::Result<()> {
    let conn = db::connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    db::migrate(&conn).await?;

    row("222", "first").insert(&conn).await?;
    let err = row("222", "second").insert(&conn).await.unwrap_err();
    assert!(matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))));

    row("", "no isbn a").insert(&conn).await?;
    row("", "no isbn b").insert(&conn).await?;
    assert_eq!(book::Entity::find().all(&conn).await?.len(), 3);
    Ok(())
}

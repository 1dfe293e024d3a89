use sea_orm_migration::prelude::*;

pub const BOOKS_ISBN_UNIQUE: &str = "idx_books_isbn_unique";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Books: unique ISBN. NULLs never collide, which keeps the index sparse.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(BOOKS_ISBN_UNIQUE)
                    .table(Books::Table)
                    .col(Books::Isbn)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(BOOKS_ISBN_UNIQUE).table(Books::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Isbn,
}

//! Create `books` table.
//! One row per stored book document; `authors` is kept as a JSON array.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(uuid(Books::Id).primary_key())
                    // nullable so rows without an ISBN stay out of the unique index
                    .col(string_null(Books::Isbn))
                    .col(text(Books::Title))
                    .col(json(Books::Authors))
                    .col(string(Books::Price))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Books::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    Isbn,
    Title,
    Authors,
    Price,
}

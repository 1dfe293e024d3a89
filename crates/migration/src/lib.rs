//! Migrator for the `store` database.
//! Indexes are applied last so that `books` exists before the unique key is declared.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_books;
mod m20240101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_books::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_indexes::Migration),
        ]
    }
}

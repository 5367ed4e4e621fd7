//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_review;
mod m20240101_000003_create_my_review;
mod m20240101_000004_create_rating_summary;
mod m20240101_000005_create_camping_summary;
mod m20240101_000006_create_bookmark;
mod m20240101_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_review::Migration),
            Box::new(m20240101_000003_create_my_review::Migration),
            Box::new(m20240101_000004_create_rating_summary::Migration),
            Box::new(m20240101_000005_create_camping_summary::Migration),
            Box::new(m20240101_000006_create_bookmark::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000007_add_indexes::Migration),
        ]
    }
}

//! Create `bookmark` table: a user's saved campsites.
//!
//! `camping_summary.bookmark_cnt` is maintained alongside rows here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookmark::Table)
                    .if_not_exists()
                    .col(big_integer(Bookmark::BookmarkId).primary_key().auto_increment())
                    .col(big_integer(Bookmark::UserId).not_null())
                    .col(big_integer(Bookmark::CampId).not_null())
                    .col(timestamp_with_time_zone(Bookmark::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookmark::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookmark { Table, BookmarkId, UserId, CampId, CreatedAt }

//! Create `review` table.
//!
//! One review per (user_id, camp_id); the unique index enforcing that lives in
//! the index migration applied last.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(big_integer(Review::ReviewId).primary_key().auto_increment())
                    .col(big_integer(Review::CampId).not_null())
                    .col(big_integer(Review::UserId).not_null())
                    .col(text(Review::Content).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(
                        ColumnDef::new(Review::ImageUrl)
                            .string_len(512)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .col(
                        ColumnDef::new(Review::ModifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review { Table, ReviewId, CampId, UserId, Content, Rating, ImageUrl, CreatedAt, ModifiedAt }

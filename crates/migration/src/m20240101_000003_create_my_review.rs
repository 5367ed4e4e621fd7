//! Create `my_review` table: per-user index of authored review ids.
//!
//! Created lazily on a user's first review; `review_ids` is a JSON array of
//! review ids kept in insertion order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MyReview::Table)
                    .if_not_exists()
                    .col(big_integer(MyReview::UserId).primary_key())
                    .col(integer(MyReview::ReviewCnt).not_null().default(0))
                    .col(json_binary(MyReview::ReviewIds).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MyReview::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MyReview { Table, UserId, ReviewCnt, ReviewIds }

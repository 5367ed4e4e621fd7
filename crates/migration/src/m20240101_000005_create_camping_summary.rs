//! Create `camping_summary` table: per-campsite review/bookmark counts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CampingSummary::Table)
                    .if_not_exists()
                    .col(big_integer(CampingSummary::CampId).primary_key())
                    .col(integer(CampingSummary::ReviewCnt).not_null().default(0))
                    .col(integer(CampingSummary::BookmarkCnt).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CampingSummary::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CampingSummary { Table, CampId, ReviewCnt, BookmarkCnt }

//! Create `rating_summary` table: per-campsite histogram of review ratings.
//!
//! One count column per star value; the sum of the five columns must equal the
//! number of active reviews for the campsite.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RatingSummary::Table)
                    .if_not_exists()
                    .col(big_integer(RatingSummary::CampId).primary_key())
                    .col(integer(RatingSummary::Rating1Cnt).not_null().default(0))
                    .col(integer(RatingSummary::Rating2Cnt).not_null().default(0))
                    .col(integer(RatingSummary::Rating3Cnt).not_null().default(0))
                    .col(integer(RatingSummary::Rating4Cnt).not_null().default(0))
                    .col(integer(RatingSummary::Rating5Cnt).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RatingSummary::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RatingSummary { Table, CampId, Rating1Cnt, Rating2Cnt, Rating3Cnt, Rating4Cnt, Rating5Cnt }

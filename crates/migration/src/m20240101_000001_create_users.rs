//! Create `users` table.
//!
//! Review listings join the author's nickname from here; the table is
//! deliberately not referenced by a foreign key so reviews survive account
//! removal.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(big_integer(Users::UserId).primary_key().auto_increment())
                    .col(string_len(Users::Nickname, 64).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(254)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, UserId, Nickname, Email, CreatedAt }

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Review: one review per (user_id, camp_id); the unique index keeps the
        // duplicate check race-free under concurrent creates
        manager
            .create_index(
                Index::create()
                    .name("uniq_review_user_camp")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .col(Review::CampId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Review: listing is by camp_id
        manager
            .create_index(
                Index::create()
                    .name("idx_review_camp")
                    .table(Review::Table)
                    .col(Review::CampId)
                    .to_owned(),
            )
            .await?;

        // Bookmark: one bookmark per (user_id, camp_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_bookmark_user_camp")
                    .table(Bookmark::Table)
                    .col(Bookmark::UserId)
                    .col(Bookmark::CampId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Bookmark: "my bookmarks" listing is by user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_bookmark_user")
                    .table(Bookmark::Table)
                    .col(Bookmark::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_review_user_camp").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_camp").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_bookmark_user_camp").table(Bookmark::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookmark_user").table(Bookmark::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Review { Table, UserId, CampId }

#[derive(DeriveIden)]
enum Bookmark { Table, UserId, CampId }

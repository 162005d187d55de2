use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(uuid(Reservations::Id).primary_key())
                    .col(uuid(Reservations::UserId))
                    .col(uuid(Reservations::PostId))
                    .col(string(Reservations::Status))
                    .col(timestamp_with_time_zone(Reservations::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // One live reservation per (user, post); the backstop behind the
        // duplicate check in the ledger.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_reservations_user_post")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .col(Reservations::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reservations_post_id")
                    .table(Reservations::Table)
                    .col(Reservations::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    UserId,
    PostId,
    Status,
    CreatedAt,
}

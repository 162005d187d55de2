use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(uuid(Posts::Id).primary_key())
                    .col(uuid(Posts::UserId))
                    .col(string(Posts::Title))
                    .col(string(Posts::Location))
                    .col(string(Posts::CampusLocation))
                    .col(text(Posts::Description))
                    .col(timestamp_with_time_zone_null(Posts::StartTime))
                    .col(timestamp_with_time_zone(Posts::EndTime))
                    .col(integer(Posts::TotalQuantity))
                    .col(integer(Posts::Quantity))
                    .col(integer(Posts::QuantityLeft))
                    .col(string_null(Posts::ImagePath))
                    .col(timestamp_with_time_zone(Posts::CreatedAt))
                    .col(timestamp_with_time_zone(Posts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_user_id")
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    UserId,
    Title,
    Location,
    CampusLocation,
    Description,
    StartTime,
    EndTime,
    TotalQuantity,
    Quantity,
    QuantityLeft,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Userinfo::Table)
                    .if_not_exists()
                    .col(uuid(Userinfo::Id).primary_key())
                    .col(string_null(Userinfo::Nickname))
                    .col(string_null(Userinfo::AvatarUrl))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Userinfo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Userinfo {
    Table,
    Id,
    Nickname,
    AvatarUrl,
}

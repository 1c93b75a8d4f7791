//! Create service table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Service::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Service::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Service::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Service::Category).string_len(16).not_null().default("other"))
                    .col(ColumnDef::new(Service::Price).double().not_null().default(0.0))
                    .col(ColumnDef::new(Service::Time).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Service::Location).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(Service::Leader).string_len(256).not_null())
                    .col(ColumnDef::new(Service::ImageUrls).json_binary().not_null())
                    .col(ColumnDef::new(Service::Status).string_len(16).not_null().default("active"))
                    .col(
                        ColumnDef::new(Service::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Service::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Service::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Service {
    Table,
    Id,
    Title,
    Description,
    Category,
    Price,
    Time,
    Location,
    Leader,
    ImageUrls,
    Status,
    CreatedAt,
    UpdatedAt,
}

//! Create holiday table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Holiday::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Holiday::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Holiday::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Holiday::Date).date().not_null())
                    .col(ColumnDef::new(Holiday::EndDate).date().not_null())
                    .col(ColumnDef::new(Holiday::Location).string_len(256).not_null())
                    .col(ColumnDef::new(Holiday::Type).string_len(16).not_null().default("celebration"))
                    .col(ColumnDef::new(Holiday::Status).string_len(16).not_null().default("upcoming"))
                    .col(ColumnDef::new(Holiday::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Holiday::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Holiday::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holiday_date")
                    .table(Holiday::Table)
                    .col(Holiday::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Holiday::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Holiday {
    Table,
    Id,
    Name,
    Date,
    EndDate,
    Location,
    Type,
    Status,
    Description,
    CreatedAt,
    UpdatedAt,
}

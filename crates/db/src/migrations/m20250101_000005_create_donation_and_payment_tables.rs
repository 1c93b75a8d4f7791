//! Create donation and payment tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donation::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Donation::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Donation::Donor).string_len(256).not_null())
                    .col(ColumnDef::new(Donation::Amount).double().not_null())
                    .col(ColumnDef::new(Donation::Date).date().not_null())
                    .col(ColumnDef::new(Donation::Status).string_len(16).not_null().default("pending"))
                    .col(ColumnDef::new(Donation::Type).string_len(16).not_null().default("one-time"))
                    .col(
                        ColumnDef::new(Donation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Donation::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payment::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Payment::Member).string_len(256).not_null())
                    .col(ColumnDef::new(Payment::Amount).double().not_null())
                    .col(ColumnDef::new(Payment::Date).date().not_null())
                    .col(ColumnDef::new(Payment::Status).string_len(16).not_null().default("pending"))
                    .col(ColumnDef::new(Payment::Type).string_len(16).not_null().default("membership"))
                    .col(ColumnDef::new(Payment::Method).string_len(16).not_null().default("card"))
                    .col(
                        ColumnDef::new(Payment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Payment::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Donation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Donation {
    Table,
    Id,
    Donor,
    Amount,
    Date,
    Status,
    Type,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Payment {
    Table,
    Id,
    Member,
    Amount,
    Date,
    Status,
    Type,
    Method,
    CreatedAt,
    UpdatedAt,
}

//! Create booking table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Booking::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Booking::UserId).string_len(32))
                    .col(ColumnDef::new(Booking::MemberName).string_len(256).not_null())
                    .col(ColumnDef::new(Booking::Contact).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(Booking::ServiceType).string_len(128).not_null())
                    .col(ColumnDef::new(Booking::Date).date().not_null())
                    .col(ColumnDef::new(Booking::Time).string_len(32))
                    .col(ColumnDef::new(Booking::Message).text().not_null().default(""))
                    .col(ColumnDef::new(Booking::Status).string_len(16).not_null().default("pending"))
                    .col(
                        ColumnDef::new(Booking::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Booking::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: date (upcoming bookings on the dashboard)
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_date")
                    .table(Booking::Table)
                    .col(Booking::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Booking {
    Table,
    Id,
    UserId,
    MemberName,
    Contact,
    ServiceType,
    Date,
    Time,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

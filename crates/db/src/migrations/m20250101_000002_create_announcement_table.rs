//! Create announcement table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Announcement::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Announcement::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Announcement::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Announcement::Body).text().not_null())
                    .col(ColumnDef::new(Announcement::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(Announcement::Author).string_len(128).not_null())
                    .col(ColumnDef::new(Announcement::Status).string_len(16).not_null().default("draft"))
                    .col(ColumnDef::new(Announcement::TargetType).string_len(16).not_null().default("all"))
                    .col(ColumnDef::new(Announcement::TargetCategories).json_binary().not_null())
                    .col(ColumnDef::new(Announcement::TargetUserIds).json_binary().not_null())
                    .col(ColumnDef::new(Announcement::Views).integer().not_null().default(0))
                    .col(ColumnDef::new(Announcement::IsRead).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Announcement::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Announcement::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: created_at (newest-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_announcement_created_at")
                    .table(Announcement::Table)
                    .col(Announcement::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Announcement::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Announcement {
    Table,
    Id,
    Title,
    Body,
    ImageUrl,
    Author,
    Status,
    TargetType,
    TargetCategories,
    TargetUserIds,
    Views,
    IsRead,
    CreatedAt,
    UpdatedAt,
}

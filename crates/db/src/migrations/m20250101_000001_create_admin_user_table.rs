//! Create `admin_user` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminUser::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(AdminUser::Email).string_len(256).not_null())
                    .col(ColumnDef::new(AdminUser::EmailLower).string_len(256).not_null().unique_key())
                    .col(ColumnDef::new(AdminUser::DisplayName).string_len(128).not_null())
                    .col(ColumnDef::new(AdminUser::Role).string_len(16).not_null().default("staff"))
                    .col(ColumnDef::new(AdminUser::Phone).string_len(64))
                    .col(ColumnDef::new(AdminUser::Department).string_len(128))
                    .col(ColumnDef::new(AdminUser::PasswordHash).string_len(256).not_null())
                    .col(ColumnDef::new(AdminUser::Token).string_len(64).unique_key())
                    .col(
                        ColumnDef::new(AdminUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AdminUser::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUser::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdminUser {
    Table,
    Id,
    Email,
    EmailLower,
    DisplayName,
    Role,
    Phone,
    Department,
    PasswordHash,
    Token,
    CreatedAt,
    UpdatedAt,
}

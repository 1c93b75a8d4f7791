//! Create message table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Message::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Message::Subject).string_len(256).not_null())
                    .col(ColumnDef::new(Message::Content).text().not_null())
                    .col(ColumnDef::new(Message::Sender).string_len(256).not_null())
                    .col(ColumnDef::new(Message::Recipient).string_len(256).not_null().default("Admin"))
                    .col(ColumnDef::new(Message::Status).string_len(16).not_null().default("unread"))
                    .col(ColumnDef::new(Message::Priority).string_len(16).not_null().default("normal"))
                    .col(ColumnDef::new(Message::Category).string_len(16).not_null().default("general"))
                    .col(ColumnDef::new(Message::Reply).text())
                    .col(ColumnDef::new(Message::RepliedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Message::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Message::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: status (unread tile on the dashboard)
        manager
            .create_index(
                Index::create()
                    .name("idx_message_status")
                    .table(Message::Table)
                    .col(Message::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Message {
    Table,
    Id,
    Subject,
    Content,
    Sender,
    Recipient,
    Status,
    Priority,
    Category,
    Reply,
    RepliedAt,
    CreatedAt,
    UpdatedAt,
}

//! Create member table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Member::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Member::Email).string_len(256).not_null())
                    .col(ColumnDef::new(Member::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Member::MiddleName).string_len(128).not_null().default(""))
                    .col(ColumnDef::new(Member::LastName).string_len(128).not_null())
                    .col(ColumnDef::new(Member::ProfileImage).text().not_null().default(""))
                    .col(ColumnDef::new(Member::MemberCategory).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Member::MaritalStatus).string_len(32).not_null().default(""))
                    .col(ColumnDef::new(Member::Gender).string_len(32).not_null().default(""))
                    .col(ColumnDef::new(Member::MembershipType).string_len(16).not_null().default("regular"))
                    .col(ColumnDef::new(Member::Status).string_len(16).not_null().default("active"))
                    .col(ColumnDef::new(Member::ChristeningName).string_len(128).not_null().default(""))
                    .col(ColumnDef::new(Member::SpiritualFatherName).string_len(128).not_null().default(""))
                    .col(ColumnDef::new(Member::FcmToken).string_len(512).not_null().default(""))
                    .col(ColumnDef::new(Member::DateOfBirth).date())
                    .col(ColumnDef::new(Member::Nationality).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Member::Address).string_len(512).not_null().default(""))
                    .col(ColumnDef::new(Member::Postcode).string_len(32).not_null().default(""))
                    .col(ColumnDef::new(Member::MobileNumber).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Member::EmergencyContactName).string_len(128).not_null().default(""))
                    .col(ColumnDef::new(Member::EmergencyContactRelation).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Member::EmergencyContactPhone).string_len(64).not_null().default(""))
                    .col(ColumnDef::new(Member::MembershipCommitmentConfirmed).boolean().not_null().default(false))
                    .col(ColumnDef::new(Member::ConsentContactChurch).boolean().not_null().default(false))
                    .col(ColumnDef::new(Member::ConsentDataUse).boolean().not_null().default(false))
                    .col(ColumnDef::new(Member::MembershipApplicationSignature).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(Member::MembershipApplicationDate).date().not_null())
                    .col(ColumnDef::new(Member::ApplicationReceivedDate).date().not_null())
                    .col(
                        ColumnDef::new(Member::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Member::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_created_at")
                    .table(Member::Table)
                    .col(Member::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Member {
    Table,
    Id,
    Email,
    FirstName,
    MiddleName,
    LastName,
    ProfileImage,
    MemberCategory,
    MaritalStatus,
    Gender,
    MembershipType,
    Status,
    ChristeningName,
    SpiritualFatherName,
    FcmToken,
    DateOfBirth,
    Nationality,
    Address,
    Postcode,
    MobileNumber,
    EmergencyContactName,
    EmergencyContactRelation,
    EmergencyContactPhone,
    MembershipCommitmentConfirmed,
    ConsentContactChurch,
    ConsentDataUse,
    MembershipApplicationSignature,
    MembershipApplicationDate,
    ApplicationReceivedDate,
    CreatedAt,
    UpdatedAt,
}

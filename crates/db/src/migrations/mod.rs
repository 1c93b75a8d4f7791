//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_admin_user_table;
mod m20250101_000002_create_announcement_table;
mod m20250101_000003_create_member_table;
mod m20250101_000004_create_booking_table;
mod m20250101_000005_create_donation_and_payment_tables;
mod m20250101_000006_create_holiday_table;
mod m20250101_000007_create_service_table;
mod m20250101_000008_create_message_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_admin_user_table::Migration),
            Box::new(m20250101_000002_create_announcement_table::Migration),
            Box::new(m20250101_000003_create_member_table::Migration),
            Box::new(m20250101_000004_create_booking_table::Migration),
            Box::new(m20250101_000005_create_donation_and_payment_tables::Migration),
            Box::new(m20250101_000006_create_holiday_table::Migration),
            Box::new(m20250101_000007_create_service_table::Migration),
            Box::new(m20250101_000008_create_message_table::Migration),
        ]
    }
}

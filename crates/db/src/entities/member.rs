//! Member entity.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    #[sea_orm(string_value = "regular")]
    Regular,
    #[sea_orm(string_value = "premium")]
    Premium,
    #[sea_orm(string_value = "senior")]
    Senior,
    #[sea_orm(string_value = "student")]
    Student,
}

/// Membership standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// Registered member of the community.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,

    /// Profile picture URL or data URI.
    #[sea_orm(column_type = "Text")]
    pub profile_image: String,

    pub member_category: String,
    pub marital_status: String,
    pub gender: String,
    pub membership_type: MembershipType,
    pub status: MemberStatus,

    pub christening_name: String,
    pub spiritual_father_name: String,

    /// Push notification token of the member's mobile app.
    pub fcm_token: String,

    #[sea_orm(nullable)]
    pub date_of_birth: Option<NaiveDate>,

    pub nationality: String,
    pub address: String,
    pub postcode: String,
    pub mobile_number: String,

    pub emergency_contact_name: String,
    pub emergency_contact_relation: String,
    pub emergency_contact_phone: String,

    pub membership_commitment_confirmed: bool,
    pub consent_contact_church: bool,
    pub consent_data_use: bool,

    pub membership_application_signature: String,
    pub membership_application_date: NaiveDate,
    pub application_received_date: NaiveDate,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// "First Middle Last", skipping an empty middle name.
    #[must_use]
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

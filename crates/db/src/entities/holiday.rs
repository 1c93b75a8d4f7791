//! Holiday entity.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    #[sea_orm(string_value = "celebration")]
    Celebration,
    #[sea_orm(string_value = "festival")]
    Festival,
    #[sea_orm(string_value = "national")]
    National,
    #[sea_orm(string_value = "religious")]
    Religious,
    #[sea_orm(string_value = "cultural")]
    Cultural,
}

impl HolidayType {
    /// Wire name, as searched by the holiday filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Celebration => "celebration",
            Self::Festival => "festival",
            Self::National => "national",
            Self::Religious => "religious",
            Self::Cultural => "cultural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum HolidayStatus {
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Holiday or community event on the calendar.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "holiday")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// First day.
    pub date: NaiveDate,

    /// Last day (inclusive).
    pub end_date: NaiveDate,

    pub location: String,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: HolidayType,

    pub status: HolidayStatus,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Service entity (classes, counseling and other offerings).

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    #[sea_orm(string_value = "fitness")]
    Fitness,
    #[sea_orm(string_value = "counseling")]
    Counseling,
    #[sea_orm(string_value = "workshop")]
    Workshop,
    #[sea_orm(string_value = "support")]
    Support,
    #[sea_orm(string_value = "education")]
    Education,
    #[sea_orm(string_value = "other")]
    Other,
}

impl ServiceCategory {
    /// Wire name, as searched by the service filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Counseling => "counseling",
            Self::Workshop => "workshop",
            Self::Support => "support",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// Offering that members can book.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub category: ServiceCategory,

    pub price: f64,

    /// Free-text duration (e.g. "60 min").
    pub time: String,

    pub location: String,

    /// Person leading the service.
    pub leader: String,

    /// Gallery image URLs (JSON array of strings).
    #[sea_orm(column_type = "JsonBinary")]
    pub image_urls: Json,

    pub status: ServiceStatus,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

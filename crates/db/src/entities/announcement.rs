//! Announcement entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Publication state of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Audience selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    #[sea_orm(string_value = "all")]
    All,
    #[sea_orm(string_value = "category")]
    Category,
    #[sea_orm(string_value = "users")]
    Users,
}

/// Announcement shown to members.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "announcement")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique announcement ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Title of the announcement.
    pub title: String,

    /// Body text.
    #[sea_orm(column_type = "Text")]
    pub body: String,

    /// Image URL for the announcement (optional).
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Display name of the account that created it.
    pub author: String,

    pub status: AnnouncementStatus,

    pub target_type: TargetType,

    /// Member categories the announcement targets (JSON array of strings).
    #[sea_orm(column_type = "JsonBinary")]
    pub target_categories: Json,

    /// Member IDs the announcement targets (JSON array of strings).
    #[sea_orm(column_type = "JsonBinary")]
    pub target_user_ids: Json,

    /// How many times it was viewed.
    pub views: i32,

    pub is_read: bool,

    /// When the announcement was created.
    pub created_at: DateTime<Utc>,

    /// When the announcement was last replaced.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Target categories as strings, skipping non-string JSON entries.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.target_categories
            .as_array()
            .map(|items| items.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }
}

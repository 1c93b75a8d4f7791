//! Payment entity.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::donation::SettlementStatus;

/// What a payment was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[sea_orm(string_value = "membership")]
    Membership,
    #[sea_orm(string_value = "event")]
    Event,
    #[sea_orm(string_value = "service")]
    Service,
    #[sea_orm(string_value = "premium")]
    Premium,
}

impl PaymentType {
    /// Wire name, as searched by the payment filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::Event => "event",
            Self::Service => "service",
            Self::Premium => "premium",
        }
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "paypal")]
    Paypal,
}

/// Member payment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Name of the paying member.
    pub member: String,

    pub amount: f64,

    pub date: NaiveDate,

    pub status: SettlementStatus,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: PaymentType,

    pub method: PaymentMethod,

    pub created_at: DateTime<Utc>,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

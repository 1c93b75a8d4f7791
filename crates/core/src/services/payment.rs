//! Payment service.

use chrono::{NaiveDate, Utc};
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::payment::{self, PaymentMethod, PaymentType, SettlementStatus};
use parish_db::repositories::PaymentRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Service for member payments.
#[derive(Clone)]
pub struct PaymentService {
    payment_repo: PaymentRepository,
    id_gen: IdGenerator,
}

/// Payment form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub member: String,

    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    pub date: Option<NaiveDate>,

    pub status: Option<SettlementStatus>,

    #[serde(rename = "type")]
    pub kind: Option<PaymentType>,

    pub method: Option<PaymentMethod>,
}

impl PaymentInput {
    fn write_to(self, active: &mut payment::ActiveModel, today: NaiveDate) {
        active.member = Set(self.member);
        active.amount = Set(self.amount);
        active.date = Set(self.date.unwrap_or(today));
        active.status = Set(self.status.unwrap_or(SettlementStatus::Pending));
        active.kind = Set(self.kind.unwrap_or(PaymentType::Membership));
        active.method = Set(self.method.unwrap_or(PaymentMethod::Card));
    }
}

impl Searchable for payment::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.member.as_str(), self.kind.as_str()]
    }
}

impl PaymentService {
    /// Create a new payment service.
    #[must_use]
    pub const fn new(payment_repo: PaymentRepository) -> Self {
        Self {
            payment_repo,
            id_gen: IdGenerator::new(),
        }
    }

    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<payment::Model>> {
        let all = self.payment_repo.find_all().await?;
        Ok(listing::filter(all, query))
    }

    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.payment_repo.find_all().await?;
        Ok(tiles(&all))
    }

    pub async fn get(&self, id: &str) -> AppResult<payment::Model> {
        self.payment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Payment", id))
    }

    pub async fn create(&self, input: PaymentInput) -> AppResult<payment::Model> {
        input.validate()?;

        let now = Utc::now();
        let mut active = payment::ActiveModel {
            id: Set(self.id_gen.generate()),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active, now.date_naive());

        self.payment_repo.create(active).await
    }

    pub async fn replace(&self, id: &str, input: PaymentInput) -> AppResult<payment::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let now = Utc::now();
        let mut active: payment::ActiveModel = existing.into();
        input.write_to(&mut active, now.date_naive());
        active.updated_at = Set(Some(now));

        self.payment_repo.update(active).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.payment_repo.delete(id).await
    }
}

/// Payment tiles.
pub fn tiles(all: &[payment::Model]) -> Vec<SummaryTile> {
    vec![
        SummaryTile::amount("totalAmount", "Total Revenue", listing::sum_by(all, |p| p.amount)),
        SummaryTile::count("pending", "Pending", pending(all)),
        SummaryTile::count(
            "completed",
            "Completed",
            listing::count_where(all, |p| p.status == SettlementStatus::Completed),
        ),
        SummaryTile::count(
            "failed",
            "Failed",
            listing::count_where(all, |p| p.status == SettlementStatus::Failed),
        ),
    ]
}

/// Payments awaiting settlement.
pub fn pending(all: &[payment::Model]) -> usize {
    listing::count_where(all, |p| p.status == SettlementStatus::Pending)
}

//! Donation service.

use chrono::{NaiveDate, Utc};
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::donation::{self, DonationType, SettlementStatus};
use parish_db::repositories::DonationRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Service for recording donations.
#[derive(Clone)]
pub struct DonationService {
    donation_repo: DonationRepository,
    id_gen: IdGenerator,
}

/// Donation form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DonationInput {
    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub donor: String,

    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    /// Defaults to today.
    pub date: Option<NaiveDate>,

    pub status: Option<SettlementStatus>,

    #[serde(rename = "type")]
    pub kind: Option<DonationType>,
}

impl DonationInput {
    fn write_to(self, active: &mut donation::ActiveModel, today: NaiveDate) {
        active.donor = Set(self.donor);
        active.amount = Set(self.amount);
        active.date = Set(self.date.unwrap_or(today));
        active.status = Set(self.status.unwrap_or(SettlementStatus::Pending));
        active.kind = Set(self.kind.unwrap_or(DonationType::OneTime));
    }
}

impl Searchable for donation::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.donor.as_str(), self.kind.as_str()]
    }
}

impl DonationService {
    /// Create a new donation service.
    #[must_use]
    pub const fn new(donation_repo: DonationRepository) -> Self {
        Self {
            donation_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List donations whose donor or type matches the query.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<donation::Model>> {
        let all = self.donation_repo.find_all().await?;
        Ok(listing::filter(all, query))
    }

    /// Summary tiles over all donations.
    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.donation_repo.find_all().await?;
        Ok(tiles(&all))
    }

    /// Get a donation by ID.
    pub async fn get(&self, id: &str) -> AppResult<donation::Model> {
        self.donation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Donation", id))
    }

    /// Record a donation.
    pub async fn create(&self, input: DonationInput) -> AppResult<donation::Model> {
        input.validate()?;

        let now = Utc::now();
        let mut active = donation::ActiveModel {
            id: Set(self.id_gen.generate()),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active, now.date_naive());

        self.donation_repo.create(active).await
    }

    /// Replace a donation.
    pub async fn replace(&self, id: &str, input: DonationInput) -> AppResult<donation::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let now = Utc::now();
        let mut active: donation::ActiveModel = existing.into();
        input.write_to(&mut active, now.date_naive());
        active.updated_at = Set(Some(now));

        self.donation_repo.update(active).await
    }

    /// Delete a donation.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.donation_repo.delete(id).await
    }
}

/// Donation tiles.
pub fn tiles(all: &[donation::Model]) -> Vec<SummaryTile> {
    vec![
        SummaryTile::amount("totalAmount", "Total Donations", total_amount(all)),
        SummaryTile::count(
            "completed",
            "Completed",
            listing::count_where(all, |d| d.status == SettlementStatus::Completed),
        ),
        SummaryTile::count(
            "monthly",
            "Monthly Donors",
            listing::count_where(all, |d| d.kind == DonationType::Monthly),
        ),
        SummaryTile::amount("average", "Average Gift", listing::average_by(all, |d| d.amount)),
    ]
}

/// Sum of all donation amounts.
pub fn total_amount(all: &[donation::Model]) -> f64 {
    listing::sum_by(all, |d| d.amount)
}

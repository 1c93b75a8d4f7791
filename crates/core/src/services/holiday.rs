//! Holiday service.

use chrono::{Datelike, NaiveDate, Utc};
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::holiday::{self, HolidayStatus, HolidayType};
use parish_db::repositories::HolidayRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Service for the holiday and event calendar.
#[derive(Clone)]
pub struct HolidayService {
    holiday_repo: HolidayRepository,
    id_gen: IdGenerator,
}

/// Holiday form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "ends_after_start"))]
pub struct HolidayInput {
    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub name: String,

    pub date: NaiveDate,

    /// Single-day holiday when absent.
    pub end_date: Option<NaiveDate>,

    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub location: String,

    #[serde(rename = "type")]
    pub kind: Option<HolidayType>,

    pub status: Option<HolidayStatus>,

    #[serde(default)]
    pub description: String,
}

fn ends_after_start(input: &HolidayInput) -> Result<(), ValidationError> {
    match input.end_date {
        Some(end) if end < input.date => Err(ValidationError::new("end_before_start")
            .with_message("endDate must not be before date".into())),
        _ => Ok(()),
    }
}

impl HolidayInput {
    fn write_to(self, active: &mut holiday::ActiveModel) {
        active.name = Set(self.name);
        active.date = Set(self.date);
        active.end_date = Set(self.end_date.unwrap_or(self.date));
        active.location = Set(self.location);
        active.kind = Set(self.kind.unwrap_or(HolidayType::Celebration));
        active.status = Set(self.status.unwrap_or(HolidayStatus::Upcoming));
        active.description = Set(self.description);
    }
}

impl Searchable for holiday::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str(), self.kind.as_str()]
    }
}

impl HolidayService {
    /// Create a new holiday service.
    #[must_use]
    pub const fn new(holiday_repo: HolidayRepository) -> Self {
        Self {
            holiday_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List holidays by name, location or type.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<holiday::Model>> {
        let all = self.holiday_repo.find_all().await?;
        Ok(listing::filter(all, query))
    }

    /// Summary tiles relative to today's month.
    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.holiday_repo.find_all().await?;
        Ok(tiles(&all, Utc::now().date_naive()))
    }

    /// Get a holiday by ID.
    pub async fn get(&self, id: &str) -> AppResult<holiday::Model> {
        self.holiday_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Holiday", id))
    }

    /// Add a holiday to the calendar.
    pub async fn create(&self, input: HolidayInput) -> AppResult<holiday::Model> {
        input.validate()?;

        let mut active = holiday::ActiveModel {
            id: Set(self.id_gen.generate()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active);

        self.holiday_repo.create(active).await
    }

    /// Replace a holiday.
    pub async fn replace(&self, id: &str, input: HolidayInput) -> AppResult<holiday::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut active: holiday::ActiveModel = existing.into();
        input.write_to(&mut active);
        active.updated_at = Set(Some(Utc::now()));

        self.holiday_repo.update(active).await
    }

    /// Delete a holiday.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.holiday_repo.delete(id).await
    }
}

/// Holiday tiles. `thisMonth` counts holidays starting in `today`'s month.
pub fn tiles(all: &[holiday::Model], today: NaiveDate) -> Vec<SummaryTile> {
    vec![
        SummaryTile::count("total", "Total Holidays", all.len()),
        SummaryTile::count("upcoming", "Upcoming", upcoming(all)),
        SummaryTile::count(
            "completed",
            "Completed",
            listing::count_where(all, |h| h.status == HolidayStatus::Completed),
        ),
        SummaryTile::count(
            "thisMonth",
            "This Month",
            listing::count_where(all, |h| {
                h.date.year() == today.year() && h.date.month() == today.month()
            }),
        ),
    ]
}

/// Holidays marked upcoming.
pub fn upcoming(all: &[holiday::Model]) -> usize {
    listing::count_where(all, |h| h.status == HolidayStatus::Upcoming)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::listing::TileValue;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_holiday(id: &str, date: NaiveDate, status: HolidayStatus) -> holiday::Model {
        holiday::Model {
            id: id.to_string(),
            name: "Meskel".to_string(),
            date,
            end_date: date,
            location: "Church grounds".to_string(),
            kind: HolidayType::Religious,
            status,
            description: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn input(date: NaiveDate, end_date: Option<NaiveDate>) -> HolidayInput {
        HolidayInput {
            name: "Meskel".to_string(),
            date,
            end_date,
            location: "Church grounds".to_string(),
            kind: None,
            status: None,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected() {
        let service = HolidayService::new(HolidayRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        )));

        let result = service
            .create(input(day(2025, 9, 27), Some(day(2025, 9, 26))))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_same_day_end_is_valid() {
        assert!(input(day(2025, 9, 27), Some(day(2025, 9, 27))).validate().is_ok());
        assert!(input(day(2025, 9, 27), None).validate().is_ok());
    }

    #[test]
    fn test_search_includes_type() {
        let holiday = create_test_holiday("h1", day(2025, 9, 27), HolidayStatus::Upcoming);
        assert!(holiday.matches("religious"));
        assert!(holiday.matches("grounds"));
        assert!(!holiday.matches("festival"));
    }

    #[test]
    fn test_this_month_uses_year_and_month() {
        let all = [
            create_test_holiday("h1", day(2025, 9, 1), HolidayStatus::Upcoming),
            create_test_holiday("h2", day(2025, 9, 30), HolidayStatus::Completed),
            create_test_holiday("h3", day(2024, 9, 15), HolidayStatus::Completed),
            create_test_holiday("h4", day(2025, 10, 1), HolidayStatus::Cancelled),
        ];

        let tiles = tiles(&all, day(2025, 9, 12));

        assert_eq!(tiles[0].value, TileValue::Count(4));
        assert_eq!(tiles[1].value, TileValue::Count(1));
        assert_eq!(tiles[2].value, TileValue::Count(2));
        assert_eq!(tiles[3].value, TileValue::Count(2));
    }
}

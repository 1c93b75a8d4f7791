//! Booking service.

use chrono::{NaiveDate, Utc};
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::booking::{self, BookingStatus};
use parish_db::repositories::BookingRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Service for managing service bookings.
#[derive(Clone)]
pub struct BookingService {
    booking_repo: BookingRepository,
    id_gen: IdGenerator,
}

/// Booking form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub user_id: Option<String>,

    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub member_name: String,

    #[serde(default)]
    #[validate(length(max = 256))]
    pub contact: String,

    #[validate(custom(function = "non_blank"), length(max = 128))]
    pub service_type: String,

    pub date: NaiveDate,

    pub time: Option<String>,

    #[serde(default)]
    pub message: String,

    pub status: Option<BookingStatus>,
}

impl BookingInput {
    fn write_to(self, active: &mut booking::ActiveModel) {
        active.user_id = Set(self.user_id);
        active.member_name = Set(self.member_name);
        active.contact = Set(self.contact);
        active.service_type = Set(self.service_type);
        active.date = Set(self.date);
        active.time = Set(self.time.filter(|t| !t.trim().is_empty()));
        active.message = Set(self.message);
        active.status = Set(self.status.unwrap_or(BookingStatus::Pending));
    }
}

impl Searchable for booking::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.member_name.as_str()]
    }
}

impl BookingService {
    /// Create a new booking service.
    #[must_use]
    pub const fn new(booking_repo: BookingRepository) -> Self {
        Self {
            booking_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List bookings whose member name matches the query.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<booking::Model>> {
        let all = self.booking_repo.find_all().await?;
        Ok(listing::filter(all, query))
    }

    /// Summary tiles over all bookings.
    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.booking_repo.find_all().await?;
        Ok(tiles(&all))
    }

    /// Get a booking by ID.
    pub async fn get(&self, id: &str) -> AppResult<booking::Model> {
        self.booking_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking", id))
    }

    /// Record a new booking.
    pub async fn create(&self, input: BookingInput) -> AppResult<booking::Model> {
        input.validate()?;

        let mut active = booking::ActiveModel {
            id: Set(self.id_gen.generate()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active);

        self.booking_repo.create(active).await
    }

    /// Replace a booking.
    pub async fn replace(&self, id: &str, input: BookingInput) -> AppResult<booking::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut active: booking::ActiveModel = existing.into();
        input.write_to(&mut active);
        active.updated_at = Set(Some(Utc::now()));

        self.booking_repo.update(active).await
    }

    /// Delete a booking.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.booking_repo.delete(id).await
    }
}

/// Booking tiles.
pub fn tiles(all: &[booking::Model]) -> Vec<SummaryTile> {
    let with_status = |status| listing::count_where(all, |b| b.status == status);

    vec![
        SummaryTile::count("total", "Total Bookings", all.len()),
        SummaryTile::count("confirmed", "Confirmed", with_status(BookingStatus::Confirmed)),
        SummaryTile::count("pending", "Pending", with_status(BookingStatus::Pending)),
        SummaryTile::count("cancelled", "Cancelled", with_status(BookingStatus::Cancelled)),
    ]
}

/// Bookings still ahead of `today` and not cancelled.
pub fn upcoming(all: &[booking::Model], today: NaiveDate) -> usize {
    listing::count_where(all, |b| b.status != BookingStatus::Cancelled && b.date >= today)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::listing::TileValue;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_booking(id: &str, name: &str, status: BookingStatus) -> booking::Model {
        booking::Model {
            id: id.to_string(),
            user_id: None,
            member_name: name.to_string(),
            contact: String::new(),
            service_type: "Counseling".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            time: None,
            message: String::new(),
            status,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> BookingService {
        BookingService::new(BookingRepository::new(Arc::new(db.into_connection())))
    }

    #[tokio::test]
    async fn test_create_requires_service_type() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let input = BookingInput {
            user_id: None,
            member_name: "Dawit".to_string(),
            contact: String::new(),
            service_type: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            time: None,
            message: String::new(),
            status: None,
        };

        assert!(matches!(
            service.create(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }]),
        );

        assert!(matches!(
            service.delete("gone").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_searches_member_name_only() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            create_test_booking("b1", "Dawit Alemu", BookingStatus::Pending),
            create_test_booking("b2", "Selam", BookingStatus::Pending),
        ]]));

        let found = service.list(Some("alemu")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b1");
    }

    #[test]
    fn test_tiles_and_upcoming() {
        let mut past = create_test_booking("b3", "C", BookingStatus::Confirmed);
        past.date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let all = [
            create_test_booking("b1", "A", BookingStatus::Pending),
            create_test_booking("b2", "B", BookingStatus::Cancelled),
            past,
        ];

        let tiles = tiles(&all);
        let counts: Vec<_> = tiles.iter().map(|t| t.value).collect();
        assert_eq!(
            counts,
            vec![
                TileValue::Count(3),
                TileValue::Count(1),
                TileValue::Count(1),
                TileValue::Count(1),
            ]
        );

        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(upcoming(&all, today), 1);
    }
}

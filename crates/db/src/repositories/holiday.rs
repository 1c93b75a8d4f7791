//! Holiday repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{Holiday, holiday};

/// Repository for holiday operations.
#[derive(Clone)]
pub struct HolidayRepository {
    db: Arc<DatabaseConnection>,
}

impl HolidayRepository {
    /// Create a new holiday repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a holiday by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<holiday::Model>> {
        Holiday::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<holiday::Model>> {
        Holiday::find()
            .order_by_desc(holiday::Column::CreatedAt)
            .order_by_desc(holiday::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new holiday.
    pub async fn create(&self, model: holiday::ActiveModel) -> AppResult<holiday::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a holiday.
    pub async fn update(&self, model: holiday::ActiveModel) -> AppResult<holiday::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a holiday. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Holiday::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Holiday", id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use holiday::{HolidayStatus, HolidayType};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_all_returns_collection() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        let holiday = holiday::Model {
            id: "h1".to_string(),
            name: "Genna".to_string(),
            date: day,
            end_date: day,
            location: "Main hall".to_string(),
            kind: HolidayType::Religious,
            status: HolidayStatus::Upcoming,
            description: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[holiday]])
                .into_connection(),
        );

        let repo = HolidayRepository::new(db);
        let result = repo.find_all().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Genna");
    }
}

//! Booking repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{Booking, booking};

/// Repository for booking operations.
#[derive(Clone)]
pub struct BookingRepository {
    db: Arc<DatabaseConnection>,
}

impl BookingRepository {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<booking::Model>> {
        Booking::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<booking::Model>> {
        Booking::find()
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new booking.
    pub async fn create(&self, model: booking::ActiveModel) -> AppResult<booking::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a booking.
    pub async fn update(&self, model: booking::ActiveModel) -> AppResult<booking::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a booking. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Booking::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Booking", id));
        }
        Ok(())
    }
}

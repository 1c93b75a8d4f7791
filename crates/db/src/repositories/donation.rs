//! Donation repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{Donation, donation};

/// Repository for donation operations.
#[derive(Clone)]
pub struct DonationRepository {
    db: Arc<DatabaseConnection>,
}

impl DonationRepository {
    /// Create a new donation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a donation by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<donation::Model>> {
        Donation::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .order_by_desc(donation::Column::CreatedAt)
            .order_by_desc(donation::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new donation.
    pub async fn create(&self, model: donation::ActiveModel) -> AppResult<donation::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a donation.
    pub async fn update(&self, model: donation::ActiveModel) -> AppResult<donation::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a donation. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Donation::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Donation", id));
        }
        Ok(())
    }
}

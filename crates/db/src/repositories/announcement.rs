//! Announcement repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{Announcement, announcement};

/// Repository for announcement operations.
#[derive(Clone)]
pub struct AnnouncementRepository {
    db: Arc<DatabaseConnection>,
}

impl AnnouncementRepository {
    /// Create a new announcement repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an announcement by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<announcement::Model>> {
        Announcement::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<announcement::Model>> {
        Announcement::find()
            .order_by_desc(announcement::Column::CreatedAt)
            .order_by_desc(announcement::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new announcement.
    pub async fn create(&self, model: announcement::ActiveModel) -> AppResult<announcement::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back an announcement.
    pub async fn update(&self, model: announcement::ActiveModel) -> AppResult<announcement::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an announcement. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Announcement::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Announcement", id));
        }
        Ok(())
    }
}

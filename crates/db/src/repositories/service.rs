//! Service repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{Service, service};

/// Repository for service operations.
#[derive(Clone)]
pub struct ServiceRepository {
    db: Arc<DatabaseConnection>,
}

impl ServiceRepository {
    /// Create a new service repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a service by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<service::Model>> {
        Service::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<service::Model>> {
        Service::find()
            .order_by_desc(service::Column::CreatedAt)
            .order_by_desc(service::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new service.
    pub async fn create(&self, model: service::ActiveModel) -> AppResult<service::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a service.
    pub async fn update(&self, model: service::ActiveModel) -> AppResult<service::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a service. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Service::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Service", id));
        }
        Ok(())
    }
}

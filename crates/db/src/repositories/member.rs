//! Member repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{Member, member};

/// Repository for member operations.
#[derive(Clone)]
pub struct MemberRepository {
    db: Arc<DatabaseConnection>,
}

impl MemberRepository {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a member by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<member::Model>> {
        Member::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<member::Model>> {
        Member::find()
            .order_by_desc(member::Column::CreatedAt)
            .order_by_desc(member::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new member.
    pub async fn create(&self, model: member::ActiveModel) -> AppResult<member::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a member.
    pub async fn update(&self, model: member::ActiveModel) -> AppResult<member::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a member. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Member::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Member", id));
        }
        Ok(())
    }
}

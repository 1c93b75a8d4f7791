//! Admin account repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{AdminUser, admin_user};

/// Repository for dashboard accounts.
#[derive(Clone)]
pub struct AdminUserRepository {
    db: Arc<DatabaseConnection>,
}

impl AdminUserRepository {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<admin_user::Model>> {
        AdminUser::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by e-mail, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<admin_user::Model>> {
        AdminUser::find()
            .filter(admin_user::Column::EmailLower.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the account holding a session token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<admin_user::Model>> {
        AdminUser::find()
            .filter(admin_user::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All accounts, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<admin_user::Model>> {
        AdminUser::find()
            .order_by_asc(admin_user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether at least one account exists.
    pub async fn any_exists(&self) -> AppResult<bool> {
        let first = AdminUser::find()
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(first.is_some())
    }

    /// Create a new account.
    pub async fn create(&self, model: admin_user::ActiveModel) -> AppResult<admin_user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an account.
    pub async fn update(&self, model: admin_user::ActiveModel) -> AppResult<admin_user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use admin_user::Role;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_account(id: &str, email: &str) -> admin_user::Model {
        admin_user::Model {
            id: id.to_string(),
            email: email.to_string(),
            email_lower: email.to_lowercase(),
            display_name: "Parish Office".to_string(),
            role: Role::Admin,
            phone: None,
            department: None,
            password_hash: "$argon2id$stub".to_string(),
            token: Some("token1".to_string()),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_found() {
        let account = create_test_account("a1", "Office@Parish.org");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[account.clone()]])
                .into_connection(),
        );

        let repo = AdminUserRepository::new(db);
        let result = repo.find_by_email("office@parish.org").await.unwrap();

        assert_eq!(result.unwrap().email_lower, "office@parish.org");
    }

    #[tokio::test]
    async fn test_find_by_token_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<admin_user::Model>::new()])
                .into_connection(),
        );

        let repo = AdminUserRepository::new(db);
        let result = repo.find_by_token("stale").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_any_exists_on_empty_table() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<admin_user::Model>::new()])
                .into_connection(),
        );

        let repo = AdminUserRepository::new(db);
        assert!(!repo.any_exists().await.unwrap());
    }
}

//! Message repository.

use std::sync::Arc;

use parish_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{Message, message};

/// Repository for message operations.
#[derive(Clone)]
pub struct MessageRepository {
    db: Arc<DatabaseConnection>,
}

impl MessageRepository {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a message by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<message::Model>> {
        Message::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch the whole collection, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<message::Model>> {
        Message::find()
            .order_by_desc(message::Column::CreatedAt)
            .order_by_desc(message::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Messages in one state, newest first.
    pub async fn find_by_status(
        &self,
        status: message::MessageStatus,
    ) -> AppResult<Vec<message::Model>> {
        Message::find()
            .filter(message::Column::Status.eq(status))
            .order_by_desc(message::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new message.
    pub async fn create(&self, model: message::ActiveModel) -> AppResult<message::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a message.
    pub async fn update(&self, model: message::ActiveModel) -> AppResult<message::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a message. Fails with `NotFound` when no row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Message::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Message", id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use message::{MessageCategory, MessagePriority, MessageStatus};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_message(id: &str, status: MessageStatus) -> message::Model {
        message::Model {
            id: id.to_string(),
            subject: "Baptism date".to_string(),
            content: "Is the 12th still free?".to_string(),
            sender: "Hanna".to_string(),
            recipient: "Admin".to_string(),
            status,
            priority: MessagePriority::Normal,
            category: MessageCategory::Booking,
            reply: None,
            replied_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_status() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_message("m1", MessageStatus::Unread),
                    create_test_message("m2", MessageStatus::Unread),
                ]])
                .into_connection(),
        );

        let repo = MessageRepository::new(db);
        let result = repo.find_by_status(MessageStatus::Unread).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|m| m.status == MessageStatus::Unread));
    }
}

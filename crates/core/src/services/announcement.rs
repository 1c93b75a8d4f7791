//! Announcement service.

use chrono::Utc;
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::announcement::{self, AnnouncementStatus, TargetType};
use parish_db::repositories::AnnouncementRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Category assigned when an announcement names none.
const DEFAULT_CATEGORY: &str = "clergy";

/// Author recorded when the creator has no display name.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Service for managing announcements.
#[derive(Clone)]
pub struct AnnouncementService {
    announcement_repo: AnnouncementRepository,
    id_gen: IdGenerator,
}

/// Announcement form. Used for both create and full replace.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementInput {
    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub title: String,

    #[validate(custom(function = "non_blank"))]
    pub body: String,

    pub image_url: Option<String>,

    pub status: Option<AnnouncementStatus>,

    pub target_type: Option<TargetType>,

    #[serde(default)]
    pub target_categories: Vec<String>,

    #[serde(default)]
    pub target_user_ids: Vec<String>,

    pub is_read: Option<bool>,
}

impl AnnouncementInput {
    fn write_to(self, active: &mut announcement::ActiveModel) {
        let categories = if self.target_categories.is_empty() {
            vec![DEFAULT_CATEGORY.to_string()]
        } else {
            self.target_categories
        };

        active.title = Set(self.title);
        active.body = Set(self.body);
        active.image_url = Set(self.image_url);
        active.status = Set(self.status.unwrap_or(AnnouncementStatus::Draft));
        active.target_type = Set(self.target_type.unwrap_or(TargetType::All));
        active.target_categories = Set(serde_json::json!(categories));
        active.target_user_ids = Set(serde_json::json!(self.target_user_ids));
        active.is_read = Set(self.is_read.unwrap_or(false));
    }
}

impl Searchable for announcement::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.body.as_str()]
    }
}

impl AnnouncementService {
    /// Create a new announcement service.
    #[must_use]
    pub const fn new(announcement_repo: AnnouncementRepository) -> Self {
        Self {
            announcement_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List announcements matching the search query, newest first.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<announcement::Model>> {
        let all = self.announcement_repo.find_all().await?;
        Ok(listing::filter(all, query))
    }

    /// Summary tiles over the whole collection.
    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.announcement_repo.find_all().await?;
        Ok(tiles(&all))
    }

    /// Get an announcement by ID.
    pub async fn get(&self, id: &str) -> AppResult<announcement::Model> {
        self.announcement_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement", id))
    }

    /// Create a new announcement authored by `author`.
    pub async fn create(
        &self,
        input: AnnouncementInput,
        author: Option<&str>,
    ) -> AppResult<announcement::Model> {
        input.validate()?;

        let author = author
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);

        let mut active = announcement::ActiveModel {
            id: Set(self.id_gen.generate()),
            author: Set(author.to_string()),
            views: Set(0),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active);

        self.announcement_repo.create(active).await
    }

    /// Replace an announcement. Author and view count are kept.
    pub async fn replace(
        &self,
        id: &str,
        input: AnnouncementInput,
    ) -> AppResult<announcement::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut active: announcement::ActiveModel = existing.into();
        input.write_to(&mut active);
        active.updated_at = Set(Some(Utc::now()));

        self.announcement_repo.update(active).await
    }

    /// Delete an announcement.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.announcement_repo.delete(id).await
    }
}

/// Announcement tiles.
pub fn tiles(all: &[announcement::Model]) -> Vec<SummaryTile> {
    vec![
        SummaryTile::count("total", "Total Announcements", all.len()),
        SummaryTile::count(
            "allCategories",
            "All Categories",
            listing::count_where(all, |a| a.categories().contains(&"all")),
        ),
        SummaryTile::count(
            "broadcast",
            "Broadcast",
            listing::count_where(all, |a| a.target_type == TargetType::All),
        ),
        SummaryTile::count("reads", "Reads", listing::count_where(all, |a| a.is_read)),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::listing::TileValue;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_announcement(id: &str, title: &str) -> announcement::Model {
        announcement::Model {
            id: id.to_string(),
            title: title.to_string(),
            body: "Details inside".to_string(),
            image_url: None,
            author: "Father Tewodros".to_string(),
            status: AnnouncementStatus::Active,
            target_type: TargetType::All,
            target_categories: serde_json::json!(["clergy"]),
            target_user_ids: serde_json::json!([]),
            views: 12,
            is_read: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn input(title: &str) -> AnnouncementInput {
        AnnouncementInput {
            title: title.to_string(),
            body: "Service starts at 9".to_string(),
            image_url: None,
            status: None,
            target_type: None,
            target_categories: vec![],
            target_user_ids: vec![],
            is_read: None,
        }
    }

    fn service_with(db: MockDatabase) -> AnnouncementService {
        AnnouncementService::new(AnnouncementRepository::new(Arc::new(db.into_connection())))
    }

    #[tokio::test]
    async fn test_create_with_blank_title_is_rejected() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));

        let result = service.create(input("   "), Some("Office")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<announcement::Model>::new()]),
        );

        let result = service.replace("nope", input("New title")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_write_to_keeps_identity_and_applies_defaults() {
        let existing = create_test_announcement("a1", "Old title");
        let mut active: announcement::ActiveModel = existing.clone().into();

        input("New title").write_to(&mut active);

        assert_eq!(active.id, ActiveValue::Unchanged("a1".to_string()));
        assert_eq!(active.created_at, ActiveValue::Unchanged(existing.created_at));
        assert_eq!(active.author, ActiveValue::Unchanged("Father Tewodros".to_string()));
        assert_eq!(active.title, ActiveValue::Set("New title".to_string()));
        assert_eq!(active.status, ActiveValue::Set(AnnouncementStatus::Draft));
        assert_eq!(
            active.target_categories,
            ActiveValue::Set(serde_json::json!(["clergy"]))
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_title_or_body() {
        let mut second = create_test_announcement("a2", "Parking");
        second.body = "Feast day parking is limited".to_string();

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
                create_test_announcement("a1", "Feast of Timkat"),
                second,
                create_test_announcement("a3", "Choir"),
            ]]),
        );

        let found = service.list(Some("FEAST")).await.unwrap();

        let ids: Vec<_> = found.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_tiles_count_predicates() {
        let mut everyone = create_test_announcement("a1", "One");
        everyone.target_categories = serde_json::json!(["all", "clergy"]);
        everyone.is_read = true;
        let mut targeted = create_test_announcement("a2", "Two");
        targeted.target_type = TargetType::Category;

        let tiles = tiles(&[everyone, targeted]);

        let values: Vec<_> = tiles.iter().map(|t| (t.key, t.value)).collect();
        assert_eq!(
            values,
            vec![
                ("total", TileValue::Count(2)),
                ("allCategories", TileValue::Count(1)),
                ("broadcast", TileValue::Count(1)),
                ("reads", TileValue::Count(1)),
            ]
        );
    }
}

//! Service catalog (classes, counseling and other offerings).

use chrono::Utc;
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::service::{self, ServiceCategory, ServiceStatus};
use parish_db::repositories::ServiceRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Service for the offerings catalog.
#[derive(Clone)]
pub struct CatalogService {
    service_repo: ServiceRepository,
    id_gen: IdGenerator,
}

/// Offering form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub category: Option<ServiceCategory>,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[serde(default)]
    #[validate(length(max = 64))]
    pub time: String,

    #[serde(default)]
    pub location: String,

    #[validate(custom(function = "non_blank"), length(max = 256))]
    pub leader: String,

    #[serde(default)]
    pub image_urls: Vec<String>,

    pub status: Option<ServiceStatus>,
}

impl ServiceInput {
    fn write_to(self, active: &mut service::ActiveModel) {
        active.title = Set(self.title);
        active.description = Set(self.description);
        active.category = Set(self.category.unwrap_or(ServiceCategory::Other));
        active.price = Set(self.price);
        active.time = Set(self.time);
        active.location = Set(self.location);
        active.leader = Set(self.leader);
        active.image_urls = Set(serde_json::json!(self.image_urls));
        active.status = Set(self.status.unwrap_or(ServiceStatus::Active));
    }
}

impl Searchable for service::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.category.as_str(), self.leader.as_str()]
    }
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(service_repo: ServiceRepository) -> Self {
        Self {
            service_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List offerings by title, category or leader.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<service::Model>> {
        let all = self.service_repo.find_all().await?;
        Ok(listing::filter(all, query))
    }

    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.service_repo.find_all().await?;
        Ok(tiles(&all))
    }

    /// Get an offering by ID.
    pub async fn get(&self, id: &str) -> AppResult<service::Model> {
        self.service_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Service", id))
    }

    /// Add an offering.
    pub async fn create(&self, input: ServiceInput) -> AppResult<service::Model> {
        input.validate()?;

        let mut active = service::ActiveModel {
            id: Set(self.id_gen.generate()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active);

        self.service_repo.create(active).await
    }

    /// Replace an offering.
    pub async fn replace(&self, id: &str, input: ServiceInput) -> AppResult<service::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut active: service::ActiveModel = existing.into();
        input.write_to(&mut active);
        active.updated_at = Set(Some(Utc::now()));

        self.service_repo.update(active).await
    }

    /// Remove an offering.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.service_repo.delete(id).await
    }
}

/// Catalog tiles.
pub fn tiles(all: &[service::Model]) -> Vec<SummaryTile> {
    vec![
        SummaryTile::count("total", "Total Services", all.len()),
        SummaryTile::count("active", "Active", active(all)),
        SummaryTile::amount("totalRevenue", "Total Revenue", listing::sum_by(all, |s| s.price)),
        SummaryTile::amount("averagePrice", "Average Price", listing::average_by(all, |s| s.price)),
    ]
}

/// Offerings currently running.
pub fn active(all: &[service::Model]) -> usize {
    listing::count_where(all, |s| s.status == ServiceStatus::Active)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::listing::TileValue;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_offering(id: &str, price: f64, status: ServiceStatus) -> service::Model {
        service::Model {
            id: id.to_string(),
            title: "Youth Bible Study".to_string(),
            description: String::new(),
            category: ServiceCategory::Education,
            price,
            time: "90 min".to_string(),
            location: "Room 2".to_string(),
            leader: "Deacon Samuel".to_string(),
            image_urls: serde_json::json!([]),
            status,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn input(price: f64) -> ServiceInput {
        ServiceInput {
            title: "Yoga".to_string(),
            description: String::new(),
            category: Some(ServiceCategory::Fitness),
            price,
            time: "60 min".to_string(),
            location: String::new(),
            leader: "Ruth".to_string(),
            image_urls: vec![],
            status: None,
        }
    }

    #[test]
    fn test_free_offering_is_valid_negative_is_not() {
        assert!(input(0.0).validate().is_ok());
        assert!(input(-1.0).validate().is_err());
    }

    #[tokio::test]
    async fn test_list_by_category_name() {
        let service = CatalogService::new(ServiceRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_offering("s1", 0.0, ServiceStatus::Active)]])
                .into_connection(),
        )));

        let found = service.list(Some("EDUC")).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_tiles() {
        let all = [
            create_test_offering("s1", 10.0, ServiceStatus::Active),
            create_test_offering("s2", 30.0, ServiceStatus::Suspended),
        ];

        let tiles = tiles(&all);

        assert_eq!(tiles[0].value, TileValue::Count(2));
        assert_eq!(tiles[1].value, TileValue::Count(1));
        assert_eq!(tiles[2].value, TileValue::Amount(40.0));
        assert_eq!(tiles[3].value, TileValue::Amount(20.0));
    }
}

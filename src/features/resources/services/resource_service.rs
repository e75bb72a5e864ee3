use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::resources::backends::ResourceBackend;
use crate::features::resources::dtos::CreateResourceDto;
use crate::features::resources::models::{NewResource, Resource, ResourceFilter};
use crate::features::resources::services::SampleCatalog;

const DEMO_NOTICE_UNCONFIGURED: &str = "Resource submitted successfully! Note: This is a demo - in production, this would be saved to the database.";
const DEMO_NOTICE_STORE_FAILED: &str =
    "Resource submitted successfully! Note: Database unavailable, this is a demo submission.";

/// Result of an insert
#[derive(Debug, Clone)]
pub struct CreatedResource {
    pub resource: Resource,
    /// False when the write was acknowledged without reaching a backing store
    pub persisted: bool,
    /// Advisory text for degraded acknowledgements
    pub message: Option<String>,
}

/// Outcome of start-up seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    NoBackend,
    AlreadyPopulated,
    Seeded(u64),
}

/// Resource store with transparent fallback to the sample catalog
pub struct ResourceService {
    backend: Option<Arc<dyn ResourceBackend>>,
    catalog: Arc<SampleCatalog>,
}

impl ResourceService {
    pub fn new(backend: Option<Arc<dyn ResourceBackend>>, catalog: Arc<SampleCatalog>) -> Self {
        Self { backend, catalog }
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    /// List matching resources. Never fails: when the backing store is missing
    /// or errors, the filtered sample catalog is returned instead.
    pub async fn list(&self, filter: &ResourceFilter) -> Vec<Resource> {
        let Some(backend) = &self.backend else {
            tracing::info!("No backing store configured, serving sample data");
            return self.catalog.filtered(filter);
        };

        match backend.list(filter).await {
            Ok(resources) => resources,
            Err(e) => {
                tracing::warn!(
                    "Backing store '{}' failed to list resources, serving sample data: {}",
                    backend.name(),
                    e
                );
                self.catalog.filtered(filter)
            }
        }
    }

    /// Validate and persist a resource.
    ///
    /// Validation failures are returned as errors. Store failures are not: the
    /// candidate is acknowledged with a `demo-` id and an advisory message.
    pub async fn insert(&self, dto: CreateResourceDto) -> Result<CreatedResource> {
        let candidate = dto.validate_into_new()?;

        let Some(backend) = &self.backend else {
            tracing::warn!(
                "No backing store configured, acknowledging '{}' without persisting",
                candidate.name
            );
            return Ok(Self::acknowledge(candidate, DEMO_NOTICE_UNCONFIGURED));
        };

        match backend.insert(&candidate).await {
            Ok(resource) => {
                tracing::info!(
                    "Resource created: id={}, type={}",
                    resource.id,
                    resource.resource_type
                );
                Ok(CreatedResource {
                    resource,
                    persisted: true,
                    message: None,
                })
            }
            Err(e) => {
                tracing::warn!(
                    "Backing store '{}' rejected insert of '{}', acknowledging without persisting: {}",
                    backend.name(),
                    candidate.name,
                    e
                );
                Ok(Self::acknowledge(candidate, DEMO_NOTICE_STORE_FAILED))
            }
        }
    }

    fn acknowledge(candidate: NewResource, notice: &str) -> CreatedResource {
        let now = Utc::now();
        let id = format!("demo-{}-{}", now.timestamp_millis(), Uuid::now_v7());

        CreatedResource {
            resource: Resource::from_new(id, now, candidate),
            persisted: false,
            message: Some(notice.to_string()),
        }
    }

    /// Seed an empty backing store with the sample catalog.
    ///
    /// Skipped when the store already holds a record. Two instances starting
    /// against the same empty store at once may both seed.
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome> {
        let Some(backend) = &self.backend else {
            tracing::info!("No backing store configured, skipping sample data seeding");
            return Ok(SeedOutcome::NoBackend);
        };

        if backend.has_any().await? {
            tracing::info!("Sample data already exists, skipping seeding");
            return Ok(SeedOutcome::AlreadyPopulated);
        }

        let batch: Vec<NewResource> = self
            .catalog
            .resources()
            .iter()
            .cloned()
            .map(NewResource::from)
            .collect();

        let written = backend.insert_many(&batch).await?;
        tracing::info!("Seeded backing store with {} sample resources", written);

        Ok(SeedOutcome::Seeded(written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::resources::models::ResourceType;
    use crate::shared::test_helpers::{sample_catalog, FailingBackend, InMemoryBackend};

    fn food_dto() -> CreateResourceDto {
        CreateResourceDto {
            name: Some("Main Street Pantry".to_string()),
            resource_type: Some("Food".to_string()),
            address: Some("123 Main St, New York, NY".to_string()),
            email: Some("pantry@example.org".to_string()),
            latitude: Some(40.7128),
            longitude: Some(-74.006),
            ..Default::default()
        }
    }

    fn food_filter() -> ResourceFilter {
        ResourceFilter {
            resource_type: Some(ResourceType::Food),
            search: None,
        }
    }

    #[tokio::test]
    async fn test_list_without_backend_serves_filtered_catalog() {
        let service = ResourceService::new(None, sample_catalog());

        let resources = service.list(&food_filter()).await;

        assert_eq!(resources.len(), 12);
        assert!(resources
            .iter()
            .all(|r| r.resource_type == ResourceType::Food && r.id.starts_with("sample-")));
    }

    #[tokio::test]
    async fn test_list_falls_back_when_backend_fails() {
        let backend = Arc::new(FailingBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());

        let filter = ResourceFilter {
            resource_type: None,
            search: Some("BROOKLYN".to_string()),
        };
        let resources = service.list(&filter).await;

        assert_eq!(resources.len(), 11);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_uses_backend_when_available() {
        let backend = Arc::new(InMemoryBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());

        assert!(service.list(&ResourceFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_persists_and_is_listed_newest_first() {
        let backend = Arc::new(InMemoryBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());

        let first = service.insert(food_dto()).await.unwrap();
        let second = service
            .insert(CreateResourceDto {
                name: Some("Second Pantry".to_string()),
                ..food_dto()
            })
            .await
            .unwrap();

        assert!(first.persisted);
        assert!(first.message.is_none());
        assert!(!first.resource.id.is_empty());

        let listed = service.list(&food_filter()).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.resource.id);
        assert_eq!(listed[1].id, first.resource.id);
    }

    #[tokio::test]
    async fn test_insert_without_backend_is_acknowledged() {
        let service = ResourceService::new(None, sample_catalog());

        let created = service.insert(food_dto()).await.unwrap();
        let again = service.insert(food_dto()).await.unwrap();

        assert!(!created.persisted);
        assert!(created.resource.id.starts_with("demo-"));
        assert_eq!(created.message.as_deref(), Some(DEMO_NOTICE_UNCONFIGURED));

        // Back-to-back acknowledgements within one millisecond stay distinct
        assert_ne!(created.resource.id, again.resource.id);

        // Acknowledged records never show up in listings
        let listed = service.list(&ResourceFilter::default()).await;
        assert!(listed.iter().all(|r| r.id != created.resource.id));
    }

    #[tokio::test]
    async fn test_insert_store_failure_is_acknowledged() {
        let backend = Arc::new(FailingBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());

        let created = service.insert(food_dto()).await.unwrap();

        assert!(!created.persisted);
        assert_eq!(created.message.as_deref(), Some(DEMO_NOTICE_STORE_FAILED));
        assert_eq!(created.resource.name, "Main Street Pantry");
    }

    #[tokio::test]
    async fn test_insert_validation_error_never_reaches_backend() {
        let backend = Arc::new(InMemoryBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());

        let err = service
            .insert(CreateResourceDto {
                email: None,
                contact: None,
                ..food_dto()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_seed_if_empty_is_at_most_once() {
        let backend = Arc::new(InMemoryBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());

        assert_eq!(service.seed_if_empty().await.unwrap(), SeedOutcome::Seeded(44));
        assert_eq!(
            service.seed_if_empty().await.unwrap(),
            SeedOutcome::AlreadyPopulated
        );
        assert_eq!(backend.len(), 44);
    }

    #[tokio::test]
    async fn test_seed_skipped_when_store_has_records() {
        let backend = Arc::new(InMemoryBackend::default());
        let service = ResourceService::new(Some(backend.clone()), sample_catalog());
        service.insert(food_dto()).await.unwrap();

        assert_eq!(
            service.seed_if_empty().await.unwrap(),
            SeedOutcome::AlreadyPopulated
        );
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.insert_calls(), 1);
    }

    #[tokio::test]
    async fn test_seed_without_backend() {
        let service = ResourceService::new(None, sample_catalog());
        assert_eq!(service.seed_if_empty().await.unwrap(), SeedOutcome::NoBackend);
    }
}

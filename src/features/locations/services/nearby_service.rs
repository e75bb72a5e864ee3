use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::geocoding::Geocoder;
use crate::features::locations::models::SearchLocation;
use crate::features::resources::models::{Resource, ResourceFilter, ResourceType};
use crate::features::resources::services::sample_data::{name_slug, sample_phone};
use crate::features::resources::services::ResourceService;
use crate::shared::constants::{NEARBY_OFFSET_SPAN_DEG, SAMPLE_ELIGIBILITY, SAMPLE_LANGUAGES};

const NEARBY_HOURS: &str = "Mon-Fri: 9:00 AM - 5:00 PM";

struct NearbyTemplate {
    name: &'static str,
    description: &'static str,
}

fn templates(resource_type: ResourceType) -> [NearbyTemplate; 3] {
    match resource_type {
        ResourceType::Food => [
            NearbyTemplate {
                name: "Community Food Bank",
                description: "Emergency food assistance and nutrition programs",
            },
            NearbyTemplate {
                name: "Local Soup Kitchen",
                description: "Hot meals served daily at noon",
            },
            NearbyTemplate {
                name: "Mobile Food Pantry",
                description: "Fresh produce and pantry items",
            },
        ],
        ResourceType::Shelter => [
            NearbyTemplate {
                name: "Emergency Shelter",
                description: "Temporary housing for individuals and families",
            },
            NearbyTemplate {
                name: "Family Housing Center",
                description: "Safe housing for families with children",
            },
            NearbyTemplate {
                name: "Youth Shelter",
                description: "Housing services for young adults",
            },
        ],
        ResourceType::Health => [
            NearbyTemplate {
                name: "Community Health Center",
                description: "Free and low-cost medical care",
            },
            NearbyTemplate {
                name: "Mental Health Clinic",
                description: "Counseling and mental health services",
            },
            NearbyTemplate {
                name: "Mobile Health Unit",
                description: "Health screenings and basic medical care",
            },
        ],
        ResourceType::Blood => [
            NearbyTemplate {
                name: "Blood Donation Center",
                description: "Blood donation center open daily",
            },
            NearbyTemplate {
                name: "Community Blood Drive",
                description: "Regular blood drives and donation events",
            },
            NearbyTemplate {
                name: "Hospital Blood Bank",
                description: "Emergency blood services",
            },
        ],
    }
}

/// Fabricate 2-3 display-only resources per type scattered around `center`.
///
/// Records are never persisted and carry `sample-` ids.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    center: &SearchLocation,
    label: &str,
) -> Vec<Resource> {
    let created_at = Utc::now();
    let stamp = created_at.timestamp_millis();
    let mut resources = Vec::new();

    for resource_type in ResourceType::ALL {
        let count = rng.random_range(2..=3);

        for (i, template) in templates(resource_type).iter().take(count).enumerate() {
            let lat_offset = (rng.random::<f64>() - 0.5) * NEARBY_OFFSET_SPAN_DEG;
            let lng_offset = (rng.random::<f64>() - 0.5) * NEARBY_OFFSET_SPAN_DEG;
            let slug = name_slug(template.name);

            resources.push(Resource {
                id: format!(
                    "sample-{}-{}-{}",
                    resource_type.as_str().to_lowercase(),
                    i,
                    stamp
                ),
                name: format!("{} near {}", template.name, label),
                resource_type,
                address: format!(
                    "{} {} Street, Local Area",
                    rng.random_range(1..=999),
                    label
                ),
                description: template.description.to_string(),
                contact: sample_phone(rng),
                email: format!("info@{}.org", slug),
                website: Some(format!("https://www.{}.org", slug)),
                hours: Some(NEARBY_HOURS.to_string()),
                services: Some(template.description.to_string()),
                eligibility: Some(SAMPLE_ELIGIBILITY.to_string()),
                languages: Some(SAMPLE_LANGUAGES.to_string()),
                latitude: center.lat + lat_offset,
                longitude: center.lng + lng_offset,
                created_at,
            });
        }
    }

    resources
}

/// Location search result handed straight to the map view
#[derive(Debug, Clone)]
pub struct LocationSearchResult {
    pub location: SearchLocation,
    pub resources: Vec<Resource>,
}

/// Geocodes a free-text location and shows stored resources alongside demo
/// resources synthesized around it
pub struct NearbyService {
    geocoder: Arc<dyn Geocoder>,
    resources: Arc<ResourceService>,
}

impl NearbyService {
    pub fn new(geocoder: Arc<dyn Geocoder>, resources: Arc<ResourceService>) -> Self {
        Self {
            geocoder,
            resources,
        }
    }

    /// Resolve `query`, then return the stored resources matching `filter`
    /// followed by the synthesized ones that match it.
    pub async fn search(
        &self,
        query: &str,
        filter: &ResourceFilter,
    ) -> Result<LocationSearchResult> {
        let label = query.trim();
        if label.is_empty() {
            return Err(AppError::Validation("Location is required".to_string()));
        }

        let point = self.geocoder.resolve(label).await?;
        let location = SearchLocation {
            lat: point.latitude,
            lng: point.longitude,
            name: label.to_string(),
        };

        let mut resources = self.resources.list(filter).await;
        let stored = resources.len();

        resources.extend(
            synthesize(&mut rand::rng(), &location, label)
                .into_iter()
                .filter(|r| r.matches(filter)),
        );
        tracing::info!(
            "Location search '{}': {} stored and {} nearby resources",
            label,
            stored,
            resources.len() - stored
        );

        Ok(LocationSearchResult {
            location,
            resources,
        })
    }
}

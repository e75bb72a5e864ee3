//! Demonstration catalog scattered around fixed New York centers.
//!
//! Used as the fallback dataset when no backing store answers, and as seed
//! data for an empty store.

use chrono::Utc;
use rand::Rng;
use std::f64::consts::PI;

use crate::features::resources::models::{Resource, ResourceFilter, ResourceType};
use crate::shared::constants::{
    CATALOG_RADIUS_KM, KM_PER_DEGREE, SAMPLE_ELIGIBILITY, SAMPLE_LANGUAGES,
    SAMPLE_PHONE_AREA_CODE,
};

const CATALOG_HOURS: &str = "Monday-Friday: 9:00 AM - 5:00 PM";

struct Center {
    lat: f64,
    lng: f64,
    area: &'static str,
}

const CENTERS: [Center; 4] = [
    Center {
        lat: 40.7128,
        lng: -74.0060,
        area: "Manhattan",
    },
    Center {
        lat: 40.6782,
        lng: -73.9442,
        area: "Brooklyn",
    },
    Center {
        lat: 40.7831,
        lng: -73.9712,
        area: "Upper Manhattan",
    },
    Center {
        lat: 40.7505,
        lng: -73.9934,
        area: "Midtown",
    },
];

struct Template {
    resource_type: ResourceType,
    name: &'static str,
    description: &'static str,
}

const TEMPLATES: [Template; 11] = [
    Template {
        resource_type: ResourceType::Food,
        name: "Community Food Bank",
        description: "Free groceries and hot meals available Monday-Friday 9AM-5PM. No documentation required.",
    },
    Template {
        resource_type: ResourceType::Food,
        name: "Local Food Pantry",
        description: "Emergency food assistance for families in need. Open Tuesday and Thursday 10AM-2PM.",
    },
    Template {
        resource_type: ResourceType::Food,
        name: "Salvation Army Kitchen",
        description: "Hot meals served daily at noon. Weekend food pantry available.",
    },
    Template {
        resource_type: ResourceType::Shelter,
        name: "Emergency Shelter",
        description: "Safe overnight accommodation for individuals and families experiencing homelessness.",
    },
    Template {
        resource_type: ResourceType::Shelter,
        name: "Family Housing Center",
        description: "Short-term housing for families with children. Meals and childcare provided.",
    },
    Template {
        resource_type: ResourceType::Shelter,
        name: "Transitional Housing",
        description: "Temporary housing with support services to help individuals get back on their feet.",
    },
    Template {
        resource_type: ResourceType::Health,
        name: "Community Health Center",
        description: "Free and low-cost medical care. Walk-ins welcome. Sliding scale fees available.",
    },
    Template {
        resource_type: ResourceType::Health,
        name: "Mobile Health Clinic",
        description: "Free health screenings and basic medical care. Rotates between multiple locations.",
    },
    Template {
        resource_type: ResourceType::Health,
        name: "Mental Health Services",
        description: "Counseling and mental health support services. Crisis intervention available 24/7.",
    },
    Template {
        resource_type: ResourceType::Blood,
        name: "Blood Donation Center",
        description: "Regular blood donation drives. All blood types needed. Walk-ins welcome.",
    },
    Template {
        resource_type: ResourceType::Blood,
        name: "Red Cross Blood Drive",
        description: "Mobile blood collection unit. Scheduled donation appointments available.",
    },
];

/// Lowercased name with all whitespace removed, used for synthetic domains
pub fn name_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<String>()
        .to_lowercase()
}

/// `(555) NNN-NNNN`
pub fn sample_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "({}) {}-{}",
        SAMPLE_PHONE_AREA_CODE,
        rng.random_range(100..=999),
        rng.random_range(1000..=9999)
    )
}

/// Point at a uniformly random angle and distance (up to `radius_km`) from a center
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, lat: f64, lng: f64, radius_km: f64) -> (f64, f64) {
    let radius_deg = radius_km / KM_PER_DEGREE;
    let angle = rng.random::<f64>() * 2.0 * PI;
    let distance = rng.random::<f64>() * radius_deg;

    (lat + distance * angle.cos(), lng + distance * angle.sin())
}

/// In-memory catalog built once at start-up
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    resources: Vec<Resource>,
}

impl SampleCatalog {
    /// One record per (center, template) pair, in center-major order
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let created_at = Utc::now();
        let mut resources = Vec::with_capacity(CENTERS.len() * TEMPLATES.len());

        for center in &CENTERS {
            for template in &TEMPLATES {
                let (latitude, longitude) =
                    scatter(rng, center.lat, center.lng, CATALOG_RADIUS_KM);
                let slug = name_slug(template.name);

                resources.push(Resource {
                    id: format!("sample-{}", resources.len() + 1),
                    name: format!("{} - {}", template.name, center.area),
                    resource_type: template.resource_type,
                    address: format!(
                        "{} {} Street, New York, NY",
                        rng.random_range(1..=999),
                        center.area
                    ),
                    description: template.description.to_string(),
                    contact: sample_phone(rng),
                    email: format!("info@{}.org", slug),
                    website: Some(format!("https://www.{}.org", slug)),
                    hours: Some(CATALOG_HOURS.to_string()),
                    services: Some(template.description.to_string()),
                    eligibility: Some(SAMPLE_ELIGIBILITY.to_string()),
                    languages: Some(SAMPLE_LANGUAGES.to_string()),
                    latitude,
                    longitude,
                    created_at,
                });
            }
        }

        Self { resources }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Catalog records passing `filter`, in catalog order
    pub fn filtered(&self, filter: &ResourceFilter) -> Vec<Resource> {
        self.resources
            .iter()
            .filter(|r| r.matches(filter))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn distance_deg(a: (f64, f64), b: (f64, f64)) -> f64 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn test_catalog_has_one_record_per_center_and_template() {
        let catalog = SampleCatalog::generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(catalog.resources().len(), CENTERS.len() * TEMPLATES.len());
        assert_eq!(catalog.resources().len(), 44);

        let ids: HashSet<_> = catalog.resources().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 44);
        assert_eq!(catalog.resources()[0].id, "sample-1");
    }

    #[test]
    fn test_generate_is_stable_in_names_and_types() {
        let a = SampleCatalog::generate(&mut rand::rng());
        let b = SampleCatalog::generate(&mut rand::rng());

        let pairs = |c: &SampleCatalog| -> Vec<(String, ResourceType)> {
            c.resources()
                .iter()
                .map(|r| (r.name.clone(), r.resource_type))
                .collect()
        };
        assert_eq!(pairs(&a), pairs(&b));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = SampleCatalog::generate(&mut StdRng::seed_from_u64(42));
        let b = SampleCatalog::generate(&mut StdRng::seed_from_u64(42));

        for (x, y) in a.resources().iter().zip(b.resources()) {
            assert_eq!(x.latitude, y.latitude);
            assert_eq!(x.contact, y.contact);
            assert_eq!(x.address, y.address);
        }
    }

    #[test]
    fn test_records_stay_within_radius_of_their_center() {
        let catalog = SampleCatalog::generate(&mut StdRng::seed_from_u64(3));
        let max = CATALOG_RADIUS_KM / KM_PER_DEGREE + 1e-9;

        for (i, r) in catalog.resources().iter().enumerate() {
            let center = &CENTERS[i / TEMPLATES.len()];
            assert!(r.name.ends_with(center.area));
            assert!(distance_deg((r.latitude, r.longitude), (center.lat, center.lng)) <= max);
        }
    }

    #[test]
    fn test_synthetic_contact_fields() {
        let catalog = SampleCatalog::generate(&mut StdRng::seed_from_u64(11));
        let first = &catalog.resources()[0];

        assert_eq!(first.name, "Community Food Bank - Manhattan");
        assert_eq!(first.email, "info@communityfoodbank.org");
        assert_eq!(
            first.website.as_deref(),
            Some("https://www.communityfoodbank.org")
        );
        assert!(first.contact.starts_with("(555) "));
        assert_eq!(first.contact.len(), "(555) 123-4567".len());
        assert!(first.address.ends_with("Manhattan Street, New York, NY"));
    }

    #[test]
    fn test_filtered_by_type() {
        let catalog = SampleCatalog::generate(&mut StdRng::seed_from_u64(5));
        let filter = ResourceFilter {
            resource_type: Some(ResourceType::Blood),
            search: None,
        };

        let blood = catalog.filtered(&filter);
        assert_eq!(blood.len(), 2 * CENTERS.len());
        assert!(blood.iter().all(|r| r.resource_type == ResourceType::Blood));
    }

    #[test]
    fn test_name_slug() {
        assert_eq!(name_slug("Red Cross  Blood Drive"), "redcrossblooddrive");
    }
}

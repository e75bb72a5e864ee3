#[cfg(test)]
pub use fakes::*;

#[cfg(test)]
mod fakes {
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::core::error::{AppError, Result};
    use crate::features::geocoding::{GeocodeResult, Geocoder};
    use crate::features::resources::backends::ResourceBackend;
    use crate::features::resources::models::{NewResource, Resource, ResourceFilter};
    use crate::features::resources::services::SampleCatalog;

    /// Catalog generated from a fixed seed
    pub fn sample_catalog() -> Arc<SampleCatalog> {
        Arc::new(SampleCatalog::generate(&mut StdRng::seed_from_u64(2024)))
    }

    /// Backing store kept in a vector; newest records listed first
    #[derive(Default)]
    pub struct InMemoryBackend {
        records: Mutex<Vec<Resource>>,
        inserts: AtomicUsize,
    }

    impl InMemoryBackend {
        pub fn len(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        pub fn insert_calls(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }

        fn store(&self, new: &NewResource) -> Resource {
            let mut records = self.records.lock().unwrap();
            let seq = records.len() as i64;
            let resource = Resource::from_new(
                format!("mem-{}", seq + 1),
                Utc::now() + Duration::milliseconds(seq),
                new.clone(),
            );
            records.push(resource.clone());
            resource
        }
    }

    #[async_trait]
    impl ResourceBackend for InMemoryBackend {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .rev()
                .filter(|r| r.matches(filter))
                .cloned()
                .collect())
        }

        async fn insert(&self, resource: &NewResource) -> Result<Resource> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            Ok(self.store(resource))
        }

        async fn insert_many(&self, resources: &[NewResource]) -> Result<u64> {
            for r in resources {
                self.store(r);
            }
            Ok(resources.len() as u64)
        }

        async fn has_any(&self) -> Result<bool> {
            Ok(self.len() > 0)
        }
    }

    /// Backing store whose every call fails
    #[derive(Default)]
    pub struct FailingBackend {
        calls: AtomicUsize,
    }

    impl FailingBackend {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn fail<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::ExternalServiceError(
                "connection refused".to_string(),
            ))
        }
    }

    #[async_trait]
    impl ResourceBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn list(&self, _filter: &ResourceFilter) -> Result<Vec<Resource>> {
            self.fail()
        }

        async fn insert(&self, _resource: &NewResource) -> Result<Resource> {
            self.fail()
        }

        async fn insert_many(&self, _resources: &[NewResource]) -> Result<u64> {
            self.fail()
        }

        async fn has_any(&self) -> Result<bool> {
            self.fail()
        }
    }

    /// Geocoder that answers every address with a fixed point, or fails with
    /// `NotFound` when constructed with [`StubGeocoder::not_found`]
    pub struct StubGeocoder {
        result: Option<GeocodeResult>,
        calls: AtomicUsize,
    }

    impl StubGeocoder {
        pub fn at(latitude: f64, longitude: f64) -> Self {
            Self {
                result: Some(GeocodeResult {
                    latitude,
                    longitude,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn not_found() -> Self {
            Self {
                result: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn resolve(&self, _address: &str) -> Result<GeocodeResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .ok_or_else(|| AppError::NotFound("Address not found".to_string()))
        }
    }
}

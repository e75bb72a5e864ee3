use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::geocoding::models::GeocodeResult;

const ADDRESS_NOT_FOUND: &str = "Address not found. Please check the address and try again.";

/// Resolves free-text addresses to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<GeocodeResult>;
}

/// LocationIQ search result (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct LocationIqPlace {
    pub lat: String,
    pub lon: String,
    #[allow(dead_code)]
    pub display_name: Option<String>,
}

/// Service for geocoding addresses using LocationIQ
///
/// One outbound request per call: no retry, no caching.
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn search_url(&self, token: &str, address: &str) -> String {
        format!(
            "{}/search?key={}&q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(token),
            urlencoding::encode(address)
        )
    }

    /// Execute HTTP request to LocationIQ and parse the first result
    async fn execute_request(&self, url: &str) -> Result<GeocodeResult> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("LocationIQ request failed: {:?}", e.without_url());
            AppError::ExternalServiceError("Geocoding request failed".to_string())
        })?;

        let status = response.status();
        // LocationIQ answers 404 ("Unable to geocode") when nothing matches
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(ADDRESS_NOT_FOUND.to_string()));
        }
        if !status.is_success() {
            tracing::warn!("LocationIQ returned status: {}", status);
            return Err(AppError::ExternalServiceError(format!(
                "Geocoding service returned status {}",
                status
            )));
        }

        let places: Vec<LocationIqPlace> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse LocationIQ response: {:?}", e.without_url());
            AppError::ExternalServiceError("Failed to parse geocoding response".to_string())
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(ADDRESS_NOT_FOUND.to_string()))?;

        Self::parse_place(&place)
    }

    fn parse_place(place: &LocationIqPlace) -> Result<GeocodeResult> {
        let latitude = place.lat.trim().parse::<f64>();
        let longitude = place.lon.trim().parse::<f64>();

        match (latitude, longitude) {
            (Ok(latitude), Ok(longitude)) => Ok(GeocodeResult {
                latitude,
                longitude,
            }),
            _ => Err(AppError::ExternalServiceError(format!(
                "Geocoding service returned invalid coordinates: {}, {}",
                place.lat, place.lon
            ))),
        }
    }
}

#[async_trait]
impl Geocoder for GeocodingService {
    async fn resolve(&self, address: &str) -> Result<GeocodeResult> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::Validation("Address is required".to_string()));
        }

        let token = self.access_token.as_deref().ok_or_else(|| {
            AppError::Configuration("LOCATIONIQ_ACCESS_TOKEN is not configured".to_string())
        })?;

        tracing::debug!("Geocoding address: {}", address);

        self.execute_request(&self.search_url(token, address)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service(base_url: String, token: Option<&str>) -> GeocodingService {
        GeocodingService::new(&GeocodingConfig {
            access_token: token.map(str::to_string),
            base_url,
        })
    }

    /// Upstream that counts hits and answers with a fixed status and body
    async fn fixed_upstream(
        status: StatusCode,
        body: serde_json::Value,
    ) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/search",
                get(
                    move |State(hits): State<Arc<AtomicUsize>>| {
                        let body = body.clone();
                        async move {
                            hits.fetch_add(1, Ordering::SeqCst);
                            (status, Json(body)).into_response()
                        }
                    },
                ),
            )
            .with_state(hits.clone());
        (spawn_upstream(router).await, hits)
    }

    #[tokio::test]
    async fn test_resolve_parses_first_result() {
        let router = Router::new().route(
            "/search",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q["key"], "test-token");
                assert_eq!(q["q"], "123 Main St, New York, NY");
                assert_eq!(q["format"], "json");
                assert_eq!(q["limit"], "1");
                Json(serde_json::json!([
                    { "lat": "40.7127281", "lon": "-74.0060152", "display_name": "New York" },
                    { "lat": "0", "lon": "0" }
                ]))
            }),
        );
        let geocoder = service(spawn_upstream(router).await, Some("test-token"));

        let result = geocoder.resolve("123 Main St, New York, NY").await.unwrap();

        assert!((result.latitude - 40.7127281).abs() < 1e-9);
        assert!((result.longitude + 74.0060152).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_address_makes_no_request() {
        let (url, hits) = fixed_upstream(StatusCode::OK, serde_json::json!([])).await;
        let geocoder = service(url, Some("test-token"));

        for address in ["", "   "] {
            let err = geocoder.resolve(address).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_token_is_configuration_error() {
        let (url, hits) = fixed_upstream(StatusCode::OK, serde_json::json!([])).await;
        let geocoder = service(url, None);

        let err = geocoder.resolve("Brooklyn").await.unwrap_err();

        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_found() {
        let (url, hits) = fixed_upstream(StatusCode::OK, serde_json::json!([])).await;
        let geocoder = service(url, Some("test-token"));

        let err = geocoder.resolve("Nowhere Lane").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upstream_404_is_not_found() {
        let (url, _) = fixed_upstream(
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": "Unable to geocode" }),
        )
        .await;
        let geocoder = service(url, Some("test-token"));

        let err = geocoder.resolve("Nowhere Lane").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_status_is_external_error() {
        let (url, _) = fixed_upstream(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({ "error": "Invalid key" }),
        )
        .await;
        let geocoder = service(url, Some("bad-token"));

        let err = geocoder.resolve("Brooklyn").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_external_error() {
        // Port 9 (discard) is not listening on the loopback interface
        let geocoder = service("http://127.0.0.1:9".to_string(), Some("test-token"));

        let err = geocoder.resolve("Brooklyn").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[test]
    fn test_parse_place_rejects_garbage() {
        let place = LocationIqPlace {
            lat: "north".to_string(),
            lon: "-74.0".to_string(),
            display_name: None,
        };
        assert!(matches!(
            GeocodingService::parse_place(&place),
            Err(AppError::ExternalServiceError(_))
        ));
    }
}

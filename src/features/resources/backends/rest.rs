use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, RequestBuilder, Response};
use serde::{Deserialize, Deserializer};

use crate::core::config::SupabaseConfig;
use crate::core::error::{AppError, Result};
use crate::features::resources::backends::ResourceBackend;
use crate::features::resources::models::{NewResource, Resource, ResourceFilter};

/// Row as returned by PostgREST
#[derive(Debug, Deserialize)]
struct RestResourceRow {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    name: String,
    #[serde(rename = "type")]
    resource_type: String,
    address: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    contact: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    hours: Option<String>,
    #[serde(default)]
    services: Option<String>,
    #[serde(default)]
    eligibility: Option<String>,
    #[serde(default)]
    languages: Option<String>,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
}

/// Accept either string (uuid) or integer (serial) primary keys
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unsupported id value: {}",
            other
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<RestResourceRow> for Resource {
    type Error = AppError;

    fn try_from(row: RestResourceRow) -> Result<Self> {
        let resource_type = row.resource_type.parse().map_err(|_| {
            AppError::ExternalServiceError(format!(
                "Stored resource {} has unknown type '{}'",
                row.id, row.resource_type
            ))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            resource_type,
            address: row.address,
            description: row.description.unwrap_or_default(),
            contact: row.contact.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            website: non_empty(row.website),
            hours: non_empty(row.hours),
            services: non_empty(row.services),
            eligibility: non_empty(row.eligibility),
            languages: non_empty(row.languages),
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
        })
    }
}

/// Turn a search term into a literal substring ILIKE pattern, quoted for use
/// inside a PostgREST `or=(...)` list
fn quote_filter_value(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            // PostgREST rewrites every `*` to `%` and offers no escape for it
            '*' => pattern.push('_'),
            '\\' | '%' | '_' => {
                pattern.push('\\');
                pattern.push(c);
            }
            _ => pattern.push(c),
        }
    }

    let quoted = pattern.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"*{}*\"", quoted)
}

/// Query parameters for a filtered, newest-first listing
fn list_params(filter: &ResourceFilter) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ];

    if let Some(resource_type) = filter.resource_type {
        params.push(("type", format!("eq.{}", resource_type)));
    }

    if let Some(search) = filter.search.as_deref() {
        let value = quote_filter_value(search);
        params.push((
            "or",
            format!(
                "(name.ilike.{v},address.ilike.{v},description.ilike.{v})",
                v = value
            ),
        ));
    }

    params
}

/// Resource store backed by a PostgREST (Supabase) `resources` table
pub struct RestResourceBackend {
    client: reqwest::Client,
    table_url: String,
    read_key: String,
    write_key: Option<String>,
}

impl RestResourceBackend {
    /// Returns `None` when no read key is configured
    pub fn new(config: &SupabaseConfig) -> Option<Self> {
        let read_key = config.read_key()?.to_string();

        Some(Self {
            client: reqwest::Client::new(),
            table_url: format!("{}/rest/v1/resources", config.url),
            read_key,
            write_key: config.service_role_key.clone(),
        })
    }

    fn authorized(&self, builder: RequestBuilder, key: &str) -> RequestBuilder {
        builder
            .header("apikey", key)
            .header(header::AUTHORIZATION, format!("Bearer {}", key))
    }

    fn write_key(&self) -> Result<&str> {
        self.write_key.as_deref().ok_or_else(|| {
            AppError::Configuration("SUPABASE_SERVICE_ROLE_KEY is not set".to_string())
        })
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("PostgREST {} request failed: {:?}", action, e);
            AppError::ExternalServiceError(format!("Backing store request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("PostgREST {} returned {}: {}", action, status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Backing store returned status {}",
                status
            )));
        }

        Ok(response)
    }

    async fn parse_rows(response: Response) -> Result<Vec<Resource>> {
        let rows: Vec<RestResourceRow> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse PostgREST response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse backing store response: {}", e))
        })?;

        rows.into_iter().map(Resource::try_from).collect()
    }
}

#[async_trait]
impl ResourceBackend for RestResourceBackend {
    fn name(&self) -> &'static str {
        "postgrest"
    }

    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        let request = self.authorized(
            self.client.get(&self.table_url).query(&list_params(filter)),
            &self.read_key,
        );

        let response = self.send(request, "list").await?;
        Self::parse_rows(response).await
    }

    async fn insert(&self, resource: &NewResource) -> Result<Resource> {
        let key = self.write_key()?;
        let request = self
            .authorized(self.client.post(&self.table_url), key)
            .header("Prefer", "return=representation")
            .json(&[resource]);

        let response = self.send(request, "insert").await?;
        Self::parse_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::ExternalServiceError("Backing store returned no inserted row".to_string())
            })
    }

    async fn insert_many(&self, resources: &[NewResource]) -> Result<u64> {
        if resources.is_empty() {
            return Ok(0);
        }

        let key = self.write_key()?;
        let request = self
            .authorized(self.client.post(&self.table_url), key)
            .header("Prefer", "return=minimal")
            .json(resources);

        self.send(request, "batch insert").await?;
        Ok(resources.len() as u64)
    }

    async fn has_any(&self) -> Result<bool> {
        let request = self.authorized(
            self.client
                .get(&self.table_url)
                .query(&[("select", "id"), ("limit", "1")]),
            &self.read_key,
        );

        let response = self.send(request, "probe").await?;
        let rows: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse backing store response: {}", e))
        })?;

        Ok(!rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resources::models::ResourceType;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use std::collections::HashMap;

    async fn spawn_postgrest(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config(url: String, service_role_key: Option<&str>) -> SupabaseConfig {
        SupabaseConfig {
            url,
            anon_key: Some("anon-key".to_string()),
            service_role_key: service_role_key.map(str::to_string),
        }
    }

    fn new_resource() -> NewResource {
        NewResource {
            name: "Night Shelter".to_string(),
            resource_type: ResourceType::Shelter,
            address: "5 Bowery, New York, NY".to_string(),
            description: String::new(),
            contact: "(555) 222-3333".to_string(),
            email: String::new(),
            website: None,
            hours: None,
            services: None,
            eligibility: None,
            languages: None,
            latitude: 40.72,
            longitude: -73.99,
        }
    }

    #[test]
    fn test_list_params_encode_filters() {
        let filter = ResourceFilter {
            resource_type: Some(ResourceType::Food),
            search: Some("soup, \"hot\"".to_string()),
        };
        let params: HashMap<_, _> = list_params(&filter).into_iter().collect();

        assert_eq!(params["type"], "eq.Food");
        assert_eq!(params["order"], "created_at.desc");
        assert_eq!(
            params["or"],
            r#"(name.ilike."*soup, \"hot\"*",address.ilike."*soup, \"hot\"*",description.ilike."*soup, \"hot\"*")"#
        );
    }

    #[test]
    fn test_search_metacharacters_are_escaped() {
        assert_eq!(quote_filter_value("100%"), r#""*100\\%*""#);
        assert_eq!(quote_filter_value("a_b"), r#""*a\\_b*""#);
        assert_eq!(quote_filter_value(r"c:\d"), r#""*c:\\\\d*""#);
        assert_eq!(quote_filter_value("a*b"), r#""*a_b*""#);

        let filter = ResourceFilter {
            resource_type: None,
            search: Some("100%".to_string()),
        };
        let params: HashMap<_, _> = list_params(&filter).into_iter().collect();
        assert_eq!(
            params["or"],
            r#"(name.ilike."*100\\%*",address.ilike."*100\\%*",description.ilike."*100\\%*")"#
        );
    }

    #[test]
    fn test_row_accepts_numeric_id_and_null_fields() {
        let row: RestResourceRow = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Clinic",
            "type": "Health",
            "address": "1 First Ave",
            "description": null,
            "contact": "(555) 000-1111",
            "email": "",
            "website": "",
            "latitude": 40.0,
            "longitude": -73.0,
            "created_at": "2025-01-02T03:04:05.123456+00:00"
        }))
        .unwrap();

        let resource = Resource::try_from(row).unwrap();
        assert_eq!(resource.id, "42");
        assert_eq!(resource.description, "");
        assert_eq!(resource.website, None);
    }

    #[tokio::test]
    async fn test_list_sends_read_key() {
        let router = Router::new().route(
            "/rest/v1/resources",
            get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(headers["apikey"], "anon-key");
                assert_eq!(q["type"], "eq.Blood");
                Json(serde_json::json!([{
                    "id": "0b7c1c7e-1d2f-4c55-9a39-5b3b0d1e2f3a",
                    "name": "Blood Center",
                    "type": "Blood",
                    "address": "9 Fifth Ave",
                    "description": "Walk-ins welcome",
                    "contact": "",
                    "email": "give@example.org",
                    "latitude": 40.75,
                    "longitude": -73.98,
                    "created_at": "2025-01-02T03:04:05Z"
                }]))
            }),
        );
        let backend = RestResourceBackend::new(&config(spawn_postgrest(router).await, None)).unwrap();

        let filter = ResourceFilter {
            resource_type: Some(ResourceType::Blood),
            search: None,
        };
        let resources = backend.list(&filter).await.unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].resource_type, ResourceType::Blood);
    }

    #[tokio::test]
    async fn test_insert_sends_service_key_and_parses_row() {
        let router = Router::new().route(
            "/rest/v1/resources",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["apikey"], "service-key");
                assert_eq!(headers["authorization"], "Bearer service-key");
                assert_eq!(headers["prefer"], "return=representation");
                assert_eq!(body[0]["name"], "Night Shelter");
                assert_eq!(body[0]["type"], "Shelter");

                let mut row = body[0].clone();
                row["id"] = serde_json::json!("7f8e2a56-3c1b-4d2e-8f90-1a2b3c4d5e6f");
                row["created_at"] = serde_json::json!("2025-03-04T05:06:07Z");
                (StatusCode::CREATED, Json(serde_json::json!([row])))
            }),
        );
        let url = spawn_postgrest(router).await;
        let backend = RestResourceBackend::new(&config(url, Some("service-key"))).unwrap();

        let resource = backend.insert(&new_resource()).await.unwrap();

        assert_eq!(resource.id, "7f8e2a56-3c1b-4d2e-8f90-1a2b3c4d5e6f");
        assert_eq!(resource.name, "Night Shelter");
        assert_eq!(resource.resource_type, ResourceType::Shelter);
        assert_eq!(resource.contact, "(555) 222-3333");
        assert_eq!(resource.created_at.to_rfc3339(), "2025-03-04T05:06:07+00:00");
    }

    #[tokio::test]
    async fn test_insert_many_sends_service_key_without_representation() {
        let router = Router::new().route(
            "/rest/v1/resources",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["apikey"], "service-key");
                assert_eq!(headers["authorization"], "Bearer service-key");
                assert_eq!(headers["prefer"], "return=minimal");
                assert_eq!(body.as_array().unwrap().len(), 3);
                StatusCode::CREATED
            }),
        );
        let url = spawn_postgrest(router).await;
        let backend = RestResourceBackend::new(&config(url, Some("service-key"))).unwrap();

        let batch = vec![new_resource(), new_resource(), new_resource()];
        assert_eq!(backend.insert_many(&batch).await.unwrap(), 3);
        assert_eq!(backend.insert_many(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_without_service_key_is_configuration_error() {
        let backend = RestResourceBackend::new(&config("http://127.0.0.1:9".to_string(), None)).unwrap();

        let err = backend.insert(&new_resource()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_external_service_error() {
        let router = Router::new().route(
            "/rest/v1/resources",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let backend = RestResourceBackend::new(&config(spawn_postgrest(router).await, None)).unwrap();

        let err = backend.has_any().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}

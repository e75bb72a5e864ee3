use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::TYPE_FILTER_ALL;

/// Category of aid a resource provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ResourceType {
    Food,
    Shelter,
    Health,
    Blood,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Food,
        ResourceType::Shelter,
        ResourceType::Health,
        ResourceType::Blood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Food => "Food",
            ResourceType::Shelter => "Shelter",
            ResourceType::Health => "Health",
            ResourceType::Blood => "Blood",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Invalid resource type: {}", s)))
    }
}

/// A community aid listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl Resource {
    /// Attach an identity and creation time to a validated candidate
    pub fn from_new(id: String, created_at: DateTime<Utc>, new: NewResource) -> Self {
        Self {
            id,
            name: new.name,
            resource_type: new.resource_type,
            address: new.address,
            description: new.description,
            contact: new.contact,
            email: new.email,
            website: new.website,
            hours: new.hours,
            services: new.services,
            eligibility: new.eligibility,
            languages: new.languages,
            latitude: new.latitude,
            longitude: new.longitude,
            created_at,
        }
    }

    /// Whether this record passes both the type and the search predicate
    pub fn matches(&self, filter: &ResourceFilter) -> bool {
        if let Some(resource_type) = filter.resource_type {
            if self.resource_type != resource_type {
                return false;
            }
        }

        match filter.search.as_deref() {
            Some(term) => {
                let needle = term.to_lowercase();
                [&self.name, &self.address, &self.description]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Validated resource candidate, ready to persist (no id or timestamp yet)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub address: String,
    pub description: String,
    pub contact: String,
    pub email: String,
    pub website: Option<String>,
    pub hours: Option<String>,
    pub services: Option<String>,
    pub eligibility: Option<String>,
    pub languages: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Resource> for NewResource {
    fn from(r: Resource) -> Self {
        Self {
            name: r.name,
            resource_type: r.resource_type,
            address: r.address,
            description: r.description,
            contact: r.contact,
            email: r.email,
            website: r.website,
            hours: r.hours,
            services: r.services,
            eligibility: r.eligibility,
            languages: r.languages,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// List filter. `None` on either side means "no predicate".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub resource_type: Option<ResourceType>,
    pub search: Option<String>,
}

impl ResourceFilter {
    /// Build a filter from raw query values; `"all"` and empty values disable
    /// the corresponding predicate.
    pub fn from_query(resource_type: Option<&str>, search: Option<&str>) -> Result<Self> {
        let resource_type = match resource_type.map(str::trim) {
            None | Some("") => None,
            Some(t) if t.eq_ignore_ascii_case(TYPE_FILTER_ALL) => None,
            Some(t) => Some(t.parse()?),
        };

        let search = search
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        Ok(Self {
            resource_type,
            search,
        })
    }
}

/// Database model for resource
#[derive(Debug, Clone, FromRow)]
pub struct ResourceRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub resource_type: String,
    pub address: String,
    pub description: String,
    pub contact: String,
    pub email: String,
    pub website: Option<String>,
    pub hours: Option<String>,
    pub services: Option<String>,
    pub eligibility: Option<String>,
    pub languages: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ResourceRow> for Resource {
    type Error = AppError;

    fn try_from(row: ResourceRow) -> Result<Self> {
        let resource_type = row.resource_type.parse().map_err(|_| {
            AppError::Internal(format!(
                "Stored resource {} has unknown type '{}'",
                row.id, row.resource_type
            ))
        })?;

        Ok(Self {
            id: row.id.to_string(),
            name: row.name,
            resource_type,
            address: row.address,
            description: row.description,
            contact: row.contact,
            email: row.email,
            website: row.website,
            hours: row.hours,
            services: row.services,
            eligibility: row.eligibility,
            languages: row.languages,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
        })
    }
}

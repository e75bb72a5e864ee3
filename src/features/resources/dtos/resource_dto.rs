use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::features::resources::models::{NewResource, Resource, ResourceType};
use crate::features::resources::services::CreatedResource;

const MISSING_REQUIRED_FIELDS: &str =
    "Missing required fields: name, type, address, and location coordinates";
const MISSING_CONTACT_METHOD: &str =
    "Please provide at least one contact method (phone or email)";

/// Query params for listing resources
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListResourcesQuery {
    /// Resource type (`Food`, `Shelter`, `Health`, `Blood`) or `all`
    #[serde(rename = "type")]
    pub resource_type: Option<String>,

    /// Case-insensitive substring matched against name, address and description
    pub search: Option<String>,
}

/// Request DTO for creating a resource
///
/// Every field is optional at the wire level so that missing fields produce a
/// validation message instead of a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateResourceDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub hours: Option<String>,
    pub services: Option<String>,
    pub eligibility: Option<String>,
    pub languages: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    Some(trimmed(value)).filter(|v| !v.is_empty())
}

impl CreateResourceDto {
    /// Check required fields and normalise the candidate
    pub fn validate_into_new(self) -> Result<NewResource> {
        let name = trimmed(self.name);
        let raw_type = trimmed(self.resource_type);
        let address = trimmed(self.address);

        let (latitude, longitude) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => (lat, lng),
            _ => return Err(AppError::Validation(MISSING_REQUIRED_FIELDS.to_string())),
        };

        if name.is_empty() || raw_type.is_empty() || address.is_empty() {
            return Err(AppError::Validation(MISSING_REQUIRED_FIELDS.to_string()));
        }

        let contact = trimmed(self.contact);
        let email = trimmed(self.email);
        if contact.is_empty() && email.is_empty() {
            return Err(AppError::Validation(MISSING_CONTACT_METHOD.to_string()));
        }

        let resource_type: ResourceType = raw_type.parse()?;

        Ok(NewResource {
            name,
            resource_type,
            address,
            description: trimmed(self.description),
            contact,
            email,
            website: trimmed_optional(self.website),
            hours: trimmed_optional(self.hours),
            services: trimmed_optional(self.services),
            eligibility: trimmed_optional(self.eligibility),
            languages: trimmed_optional(self.languages),
            latitude,
            longitude,
        })
    }
}

/// Response DTO for a created (or acknowledged) resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResourceDto {
    #[serde(flatten)]
    pub resource: Resource,

    /// Present only when the backing store did not accept the write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CreatedResource> for CreatedResourceDto {
    fn from(created: CreatedResource) -> Self {
        Self {
            resource: created.resource,
            message: created.message,
        }
    }
}

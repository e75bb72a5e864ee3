use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::geocoding::GeocodeResult;
use crate::features::resources::dtos::CreateResourceDto;

/// Field values of an in-progress resource submission
///
/// Every field is a plain string so a partially filled form can be stored and
/// restored as-is. Blank means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ResourceDraft {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
    #[validate(length(max = 100, message = "Phone must be at most 100 characters"))]
    pub contact: String,
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,
    #[validate(length(max = 500, message = "Website must be at most 500 characters"))]
    pub website: String,
    #[validate(length(max = 500, message = "Hours must be at most 500 characters"))]
    pub hours: String,
    #[validate(length(max = 1000, message = "Services must be at most 1000 characters"))]
    pub services: String,
    #[validate(length(max = 1000, message = "Eligibility must be at most 1000 characters"))]
    pub eligibility: String,
    #[validate(length(max = 500, message = "Languages must be at most 500 characters"))]
    pub languages: String,
}

fn filled(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ResourceDraft {
    /// True when no field holds anything but whitespace
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.resource_type,
            &self.address,
            &self.description,
            &self.contact,
            &self.email,
            &self.website,
            &self.hours,
            &self.services,
            &self.eligibility,
            &self.languages,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }

    /// Build the insert candidate for a geocoded draft.
    ///
    /// The phone falls back to the email address, and an empty description is
    /// replaced with a generated summary.
    pub fn into_candidate(self, point: GeocodeResult) -> CreateResourceDto {
        let resource_type = self.resource_type.trim().to_string();
        let email = filled(&self.email);
        let contact = filled(&self.contact).or_else(|| email.clone());
        let services = filled(&self.services);

        let description = filled(&self.description).unwrap_or_else(|| {
            format!(
                "{} resource providing {}.",
                resource_type,
                services.as_deref().unwrap_or("community services")
            )
        });

        CreateResourceDto {
            name: filled(&self.name),
            resource_type: Some(resource_type),
            address: filled(&self.address),
            description: Some(description),
            contact,
            email,
            website: filled(&self.website),
            hours: filled(&self.hours),
            services,
            eligibility: filled(&self.eligibility),
            languages: filled(&self.languages),
            latitude: Some(point.latitude),
            longitude: Some(point.longitude),
        }
    }
}

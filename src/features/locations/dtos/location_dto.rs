use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::models::SearchLocation;
use crate::features::locations::services::LocationSearchResult;
use crate::features::resources::models::Resource;

/// Request DTO for a free-text location search
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationSearchDto {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Location must be between 1 and 200 characters"
    ))]
    #[serde(default)]
    pub query: String,

    /// Resource type (`Food`, `Shelter`, `Health`, `Blood`) or `all`
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
}

/// Response DTO: the resolved center, stored resources, then demo resources around it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationSearchResponseDto {
    pub location: SearchLocation,
    pub resources: Vec<Resource>,
}

impl From<LocationSearchResult> for LocationSearchResponseDto {
    fn from(result: LocationSearchResult) -> Self {
        Self {
            location: result.location,
            resources: result.resources,
        }
    }
}

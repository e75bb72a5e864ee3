use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::locations::dtos::{LocationSearchDto, LocationSearchResponseDto};
use crate::features::locations::services::NearbyService;
use crate::features::resources::models::ResourceFilter;
use crate::shared::types::ErrorResponse;

/// Search a location and list resources to show around it
///
/// Stored resources come first, followed by demo resources synthesized for
/// display and never stored. The optional `type` filter applies to both.
#[utoipa::path(
    post,
    path = "/api/locations/search",
    request_body = LocationSearchDto,
    responses(
        (status = 200, description = "Location resolved", body = LocationSearchResponseDto),
        (status = 400, description = "Location is required or type is invalid", body = ErrorResponse),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 502, description = "Geocoding service failed", body = ErrorResponse),
        (status = 503, description = "Geocoding service not configured", body = ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn search_location(
    State(service): State<Arc<NearbyService>>,
    AppJson(dto): AppJson<LocationSearchDto>,
) -> Result<Json<LocationSearchResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let filter = ResourceFilter::from_query(dto.resource_type.as_deref(), None)?;
    let result = service.search(&dto.query, &filter).await?;
    Ok(Json(result.into()))
}

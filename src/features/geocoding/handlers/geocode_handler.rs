use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::geocoding::dtos::GeocodeRequestDto;
use crate::features::geocoding::models::GeocodeResult;
use crate::features::geocoding::services::Geocoder;
use crate::shared::types::ErrorResponse;

/// Resolve an address to coordinates
#[utoipa::path(
    post,
    path = "/api/geocode",
    request_body = GeocodeRequestDto,
    responses(
        (status = 200, description = "Address resolved", body = GeocodeResult),
        (status = 400, description = "Address is required", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse),
        (status = 502, description = "Geocoding service failed", body = ErrorResponse),
        (status = 503, description = "Geocoding service not configured", body = ErrorResponse)
    ),
    tag = "geocoding"
)]
pub async fn geocode(
    State(geocoder): State<Arc<dyn Geocoder>>,
    AppJson(dto): AppJson<GeocodeRequestDto>,
) -> Result<Json<GeocodeResult>> {
    let address = dto.address.unwrap_or_default();
    let result = geocoder.resolve(&address).await?;
    Ok(Json(result))
}

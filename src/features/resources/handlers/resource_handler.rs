use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::resources::dtos::{CreateResourceDto, CreatedResourceDto, ListResourcesQuery};
use crate::features::resources::models::{Resource, ResourceFilter};
use crate::features::resources::services::ResourceService;
use crate::shared::types::ErrorResponse;

/// List resources
///
/// Falls back to the sample catalog when the backing store is unavailable.
#[utoipa::path(
    get,
    path = "/api/resources",
    params(ListResourcesQuery),
    responses(
        (status = 200, description = "Matching resources", body = Vec<Resource>),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn list_resources(
    State(service): State<Arc<ResourceService>>,
    AppQuery(query): AppQuery<ListResourcesQuery>,
) -> Result<Json<Vec<Resource>>> {
    let filter =
        ResourceFilter::from_query(query.resource_type.as_deref(), query.search.as_deref())?;
    Ok(Json(service.list(&filter).await))
}

/// Create a resource
#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created or acknowledged", body = CreatedResourceDto),
        (status = 400, description = "Missing required fields", body = ErrorResponse)
    ),
    tag = "resources"
)]
pub async fn create_resource(
    State(service): State<Arc<ResourceService>>,
    AppJson(dto): AppJson<CreateResourceDto>,
) -> Result<(StatusCode, Json<CreatedResourceDto>)> {
    let created = service.insert(dto).await?;
    tracing::debug!(
        "Returning resource {} (persisted={})",
        created.resource.id,
        created.persisted
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}

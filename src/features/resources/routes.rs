use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::resources::handlers;
use crate::features::resources::services::ResourceService;

/// Create routes for the resources feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ResourceService>) -> Router {
    Router::new()
        .route(
            "/api/resources",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .with_state(service)
}

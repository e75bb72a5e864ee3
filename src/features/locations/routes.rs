use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::NearbyService;

/// Create routes for the locations feature
pub fn routes(service: Arc<NearbyService>) -> Router {
    Router::new()
        .route("/api/locations/search", post(handlers::search_location))
        .with_state(service)
}

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::geocoding::handlers;
use crate::features::geocoding::services::Geocoder;

/// Create routes for the geocoding feature
pub fn routes(geocoder: Arc<dyn Geocoder>) -> Router {
    Router::new()
        .route("/api/geocode", post(handlers::geocode))
        .with_state(geocoder)
}

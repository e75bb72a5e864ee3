use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coordinates resolved for one address; never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resolved search center, labelled with the text the user typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchLocation {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

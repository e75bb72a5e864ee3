use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for address resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GeocodeRequestDto {
    pub address: Option<String>,
}

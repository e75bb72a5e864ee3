//! Free-text location search: stored resources plus demo resources synthesized around the hit.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/locations/search` | No | Geocode a location and list stored plus nearby demo resources, optionally by type |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::NearbyService;

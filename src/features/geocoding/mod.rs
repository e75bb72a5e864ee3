//! Address resolution through LocationIQ.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/geocode` | No | Resolve an address to coordinates |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::GeocodeResult;
pub use services::{Geocoder, GeocodingService};

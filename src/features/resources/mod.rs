//! Community aid resources: listing with sample-data fallback, and creation.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/resources` | No | List resources (`type`, `search` filters) |
//! | POST | `/api/resources` | No | Create a resource |

pub mod backends;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use backends::{PgResourceBackend, ResourceBackend, RestResourceBackend};
pub use services::{ResourceService, SampleCatalog};

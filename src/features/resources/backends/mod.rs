//! Backing stores for resources.
//!
//! The service talks to whichever store is configured through
//! [`ResourceBackend`]; with none configured it serves the sample catalog.

mod postgres;
mod rest;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::resources::models::{NewResource, Resource, ResourceFilter};

pub use postgres::PgResourceBackend;
pub use rest::RestResourceBackend;

#[async_trait]
pub trait ResourceBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Matching records, newest first
    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>>;

    /// Persist one record and return it with its store-assigned id and timestamp
    async fn insert(&self, resource: &NewResource) -> Result<Resource>;

    /// Persist a batch, returning the number of rows written
    async fn insert_many(&self, resources: &[NewResource]) -> Result<u64>;

    /// Whether the store holds at least one record
    async fn has_any(&self) -> Result<bool>;
}

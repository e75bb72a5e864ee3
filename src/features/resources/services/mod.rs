mod resource_service;
pub mod sample_data;

pub use resource_service::{CreatedResource, ResourceService};
pub use sample_data::SampleCatalog;

mod resource;

pub use resource::{NewResource, Resource, ResourceFilter, ResourceRow, ResourceType};

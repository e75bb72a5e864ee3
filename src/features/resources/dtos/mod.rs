mod resource_dto;

pub use resource_dto::{CreateResourceDto, CreatedResourceDto, ListResourcesQuery};

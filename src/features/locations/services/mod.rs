mod nearby_service;

pub use nearby_service::{LocationSearchResult, NearbyService};

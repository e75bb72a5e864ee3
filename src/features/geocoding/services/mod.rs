mod geocoding_service;

pub use geocoding_service::{Geocoder, GeocodingService};

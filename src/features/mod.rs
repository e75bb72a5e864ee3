pub mod geocoding;
pub mod locations;
pub mod resources;
pub mod submissions;

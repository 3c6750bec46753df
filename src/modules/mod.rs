pub mod api;
pub mod geocoding;

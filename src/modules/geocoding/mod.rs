//! Address lookup for the complaint wizard's location step.

mod nominatim;

pub use nominatim::{NominatimClient, NominatimPlace};

use async_trait::async_trait;

use crate::core::error::Result;

/// Shown when reverse geocoding finds no address for a pin.
pub const ADDRESS_NOT_FOUND: &str = "Address not found.";

/// A forward geocoding hit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Human-readable address for a coordinate pair.
    async fn reverse(&self, lat: f64, lng: f64) -> Result<String>;

    /// Best match for a free-form query, if any.
    async fn search(&self, query: &str) -> Result<Option<GeocodedLocation>>;
}

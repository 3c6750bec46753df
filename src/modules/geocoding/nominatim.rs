use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::modules::geocoding::{GeocodedLocation, Geocoder, ADDRESS_NOT_FOUND};

/// Nominatim search/reverse result (fields used by the wizard)
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NominatimPlace {
    /// Nominatim sends coordinates as strings.
    fn to_location(&self) -> Option<GeocodedLocation> {
        let lat = self.lat.as_deref()?.parse().ok()?;
        let lng = self.lon.as_deref()?.parse().ok()?;
        Some(GeocodedLocation {
            lat,
            lng,
            display_name: self.display_name.clone().unwrap_or_default(),
        })
    }
}

/// Geocoder backed by the Nominatim HTTP API
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reverse_url(&self, lat: f64, lng: f64) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url, lat, lng
        )
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&limit=1&q={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Execute HTTP request to Nominatim and parse response
    async fn execute_request<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse(&self, lat: f64, lng: f64) -> Result<String> {
        let url = self.reverse_url(lat, lng);
        tracing::debug!("Reverse geocoding ({}, {}) -> {}", lat, lng, url);

        let place: NominatimPlace = self.execute_request(&url).await?;
        Ok(place
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string()))
    }

    async fn search(&self, query: &str) -> Result<Option<GeocodedLocation>> {
        let url = self.search_url(query);
        tracing::debug!("Geocoding (free-form): {} -> {}", query, url);

        let places: Vec<NominatimPlace> = self.execute_request(&url).await?;
        Ok(places.first().and_then(NominatimPlace::to_location))
    }
}

use crate::clients::{GEOAPIFY_BASE_URL, HTTP_CLIENT};
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::Deserialize;

/// Human-readable description of a reverse-geocoded location
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceInfo {
    /// Place category, e.g. "street" or "amenity"
    pub kind: String,
    /// Formatted address line
    pub formatted: String,
}

/// Resolves a geographic point into a place description
pub trait ReverseGeocoder: Send + Sync {
    fn reverse(&self, point: &LatLng) -> Result<PlaceInfo>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    result_type: String,
    formatted: String,
}

/// Client for the Geoapify reverse-geocoding and isoline APIs
#[derive(Debug, Clone)]
pub struct GeoapifyClient {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl GeoapifyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEOAPIFY_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different host (used against test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl ReverseGeocoder for GeoapifyClient {
    fn reverse(&self, point: &LatLng) -> Result<PlaceInfo> {
        let url = format!("{}/v1/geocode/reverse", self.base_url);
        let resp = HTTP_CLIENT
            .get(&url)
            .query(&[
                ("lon", point.lng.to_string()),
                ("lat", point.lat.to_string()),
                ("format", "json".to_string()),
                ("apiKey", self.api_key.clone()),
            ])
            .send()?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()).into());
        }

        let body: GeocodeResponse = resp.json()?;
        // Only the first result matters; the rest are ignored.
        let first = body.results.into_iter().next().ok_or_else(|| {
            MapError::ParseError("reverse geocode response carried no results".to_string())
        })?;

        Ok(PlaceInfo {
            kind: first.result_type,
            formatted: first.formatted,
        })
    }
}

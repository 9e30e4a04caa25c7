//! Build-time configuration for the widget
//!
//! All policy values live here: tile and WMS sources, the initial view, the
//! isochrone thresholds and the zoom levels applied after overlay and
//! thematic-layer changes. The API credential is the one runtime input and
//! is read from the environment, never embedded in source.

use crate::core::geo::LatLng;
use crate::layers::base::Color;
use crate::layers::style::{DEFAULT_PALETTE, DEFAULT_STROKE_WIDTH};
use crate::{MapError, Result};

/// Environment variable holding the Geoapify API credential.
pub const API_KEY_ENV: &str = "GEOAPIFY_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// URL template for the base tile layer
    pub base_tile_url: String,
    /// WMS endpoint serving the static thematic raster
    pub thematic_wms_url: String,
    /// WMS layer name requested from the thematic endpoint
    pub thematic_layer_name: String,
    /// Initial viewport center
    pub initial_center: LatLng,
    /// Initial viewport zoom
    pub initial_zoom: f64,
    /// Isochrone thresholds in seconds, in increasing order
    pub thresholds: Vec<u32>,
    /// Zoom applied after a successful overlay swap so the reachability
    /// area is typically visible (a policy value, not derived from bounds)
    pub overlay_zoom: f64,
    /// Zoom applied when the thematic layer turns on
    pub thematic_zoom: f64,
    /// Stroke palette for reachability features
    pub palette: [Color; 2],
    /// Stroke width for reachability features
    pub stroke_width: f32,
    /// Geoapify API credential
    pub api_key: String,
}

impl WidgetConfig {
    /// Creates a configuration with the stock policy values and the given
    /// API credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            thematic_wms_url: "https://gitc.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi"
                .to_string(),
            thematic_layer_name: "MODIS_Terra_L3_Land_Surface_Temp_Monthly_Day".to_string(),
            // Eifel Str. 20, Bonn, Germany
            initial_center: LatLng::new(50.7378408, 7.0839985),
            initial_zoom: 19.0,
            thresholds: vec![300, 600, 1800],
            overlay_zoom: 15.0,
            thematic_zoom: 1.0,
            palette: DEFAULT_PALETTE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            api_key: api_key.into(),
        }
    }

    /// Creates a configuration with the credential taken from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| MapError::Config(format!("{} is not set", API_KEY_ENV)))?;
        if api_key.is_empty() {
            return Err(MapError::Config(format!("{} is empty", API_KEY_ENV)).into());
        }
        Ok(Self::new(api_key))
    }

    /// Replaces the isochrone thresholds
    pub fn with_thresholds(mut self, thresholds: Vec<u32>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replaces the initial view
    pub fn with_view(mut self, center: LatLng, zoom: f64) -> Self {
        self.initial_center = center;
        self.initial_zoom = zoom;
        self
    }
}

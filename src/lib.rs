//! # reachmap
//!
//! An interactive map widget core: click to reverse-geocode a location into
//! a popup, double-click to fetch a color-coded reachability (isochrone)
//! overlay, and toggle a static thematic raster layer.
//!
//! Base-tile rasterization and pointer event dispatch belong to the host
//! render surface; this crate owns the viewport, the layer registry, the
//! popup and overlay controllers, and the network clients feeding them.

pub mod clients;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod ui;

// Re-export public API
pub use crate::core::{
    config::WidgetConfig,
    geo::{LatLng, LatLngBounds, Point},
    map::{MapWidget, WidgetOptions},
    viewport::Viewport,
};

pub use crate::layers::{
    base::{Canvas, Layer, LayerKind, StrokeStyle},
    reachability::{IsolineFeature, IsolineSet, OverlayManager, ReachabilityLayer},
    registry::LayerRegistry,
    tile::{TileLayer, WmsLayer},
};

pub use crate::clients::{
    geocode::{GeoapifyClient, PlaceInfo, ReverseGeocoder},
    isoline::IsolineService,
};

pub use crate::input::events::{InputEvent, MouseButton};

pub use crate::ui::popup::{PopupController, PopupState};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types. Transport and decode failures flow into the boxed
/// `Result` alias via `?`; these variants cover the errors the crate
/// raises itself.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

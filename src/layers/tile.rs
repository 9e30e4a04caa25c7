use crate::core::viewport::Viewport;
use crate::layers::base::{Canvas, Layer, LayerKind, LayerProperties};
use crate::Result;

pub const BASE_LAYER_ID: &str = "base";
pub const THEMATIC_LAYER_ID: &str = "thematic";

/// Base raster tile layer (slippy map scheme)
pub struct TileLayer {
    properties: LayerProperties,
    url_template: String,
}

impl TileLayer {
    pub fn new(id: String, name: String, url_template: String) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerKind::Tile),
            url_template,
        }
    }

    /// Builds the tile URL for a slippy-map coordinate
    pub fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl Layer for TileLayer {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn name(&self) -> &str {
        &self.properties.name
    }

    fn kind(&self) -> LayerKind {
        self.properties.kind
    }

    fn is_visible(&self) -> bool {
        self.properties.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.properties.visible = visible;
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _viewport: &Viewport) -> Result<()> {
        // Raster tiles are fetched and composited by the host render
        // surface; the registry entry only carries source and visibility.
        Ok(())
    }
}

/// Static thematic raster served over WMS
pub struct WmsLayer {
    properties: LayerProperties,
    endpoint: String,
    layer_name: String,
}

impl WmsLayer {
    pub fn new(id: String, name: String, endpoint: String, layer_name: String) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerKind::Wms),
            endpoint,
            layer_name,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    /// GetMap request parameters for the host to append a bounding box to
    pub fn request_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("service", "WMS".to_string()),
            ("request", "GetMap".to_string()),
            ("layers", self.layer_name.clone()),
            ("format", "image/png".to_string()),
        ]
    }
}

impl Layer for WmsLayer {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn name(&self) -> &str {
        &self.properties.name
    }

    fn kind(&self) -> LayerKind {
        self.properties.kind
    }

    fn is_visible(&self) -> bool {
        self.properties.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.properties.visible = visible;
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _viewport: &Viewport) -> Result<()> {
        // As with tiles, WMS imagery is fetched by the host render surface.
        Ok(())
    }
}

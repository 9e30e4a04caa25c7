use crate::core::geo::{LatLngBounds, Point};
use crate::core::viewport::Viewport;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Tile,
    Wms,
    Vector,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Tile => write!(f, "tile"),
            LayerKind::Wms => write!(f, "wms"),
            LayerKind::Vector => write!(f, "vector"),
        }
    }
}

/// RGBA color used for vector strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Stroke style for a single vector feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, kind: LayerKind) -> Self {
        Self {
            id,
            name,
            kind,
            visible: true,
        }
    }
}

/// Drawing seam implemented by the host render surface.
///
/// Layers project their geometry to container pixels and hand the result to
/// the canvas; rasterization happens outside this crate.
pub trait Canvas {
    /// Strokes a polygon given its projected rings (exterior first)
    fn stroke_polygon(&mut self, rings: &[Vec<Point>], style: &StrokeStyle) -> Result<()>;
}

/// Common interface for everything the layer registry holds
pub trait Layer {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn kind(&self) -> LayerKind;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    /// Geographical extent of the layer content, if known
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Draws the layer onto the canvas. Called once per redraw; layers must
    /// resolve any geometry-derived style here rather than caching it.
    fn draw(&self, canvas: &mut dyn Canvas, viewport: &Viewport) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            "Test Layer".to_string(),
            LayerKind::Vector,
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.name, "Test Layer");
        assert_eq!(props.kind, LayerKind::Vector);
        assert!(props.visible);
    }

    #[test]
    fn test_layer_kind_display() {
        assert_eq!(LayerKind::Tile.to_string(), "tile");
        assert_eq!(LayerKind::Wms.to_string(), "wms");
        assert_eq!(LayerKind::Vector.to_string(), "vector");
    }

    #[test]
    fn test_color_constructors() {
        let opaque = Color::rgb(0, 128, 0);
        assert_eq!(opaque.a, 255);
        assert_eq!(opaque, Color::new(0, 128, 0, 255));
    }
}

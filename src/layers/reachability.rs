//! Reachability (isochrone) overlay: the feature set, its vector layer,
//! and the manager owning the single "current" overlay.

use crate::clients::isoline::IsolineService;
use crate::core::geo::{ring_length_m, LatLngBounds, Point};
use crate::core::viewport::Viewport;
use crate::data::geojson::PolygonRings;
use crate::layers::base::{Canvas, Color, Layer, LayerKind, LayerProperties};
use crate::layers::registry::LayerRegistry;
use crate::layers::style;
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

/// One polygon feature of an isochrone response
#[derive(Debug, Clone, PartialEq)]
pub struct IsolineFeature {
    polygons: Vec<PolygonRings>,
    properties: HashMap<String, serde_json::Value>,
}

impl IsolineFeature {
    pub fn new(polygons: Vec<PolygonRings>, properties: HashMap<String, serde_json::Value>) -> Self {
        Self {
            polygons,
            properties,
        }
    }

    pub fn polygons(&self) -> &[PolygonRings] {
        &self.polygons
    }

    pub fn properties(&self) -> &HashMap<String, serde_json::Value> {
        &self.properties
    }

    /// Total perimeter of the feature in meters: the sum of all ring
    /// lengths, exteriors and holes alike. `None` when the feature has no
    /// computable geometry.
    pub fn perimeter_m(&self) -> Option<f64> {
        let mut total = 0.0;
        let mut measured = false;

        for polygon in &self.polygons {
            if polygon.exterior.len() >= 2 {
                total += ring_length_m(&polygon.exterior);
                measured = true;
            }
            for hole in &polygon.holes {
                if hole.len() >= 2 {
                    total += ring_length_m(hole);
                    measured = true;
                }
            }
        }

        measured.then_some(total)
    }

    /// Bounding box of the feature's exterior rings
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;
        for polygon in &self.polygons {
            if let Some(ring_bounds) = LatLngBounds::from_points(&polygon.exterior) {
                bounds = Some(match bounds {
                    Some(b) => b.union(&ring_bounds),
                    None => ring_bounds,
                });
            }
        }
        bounds
    }
}

/// Ordered feature set of one isochrone query, one feature per threshold.
/// Produced fresh on every query; never merged with a prior set.
pub type IsolineSet = Vec<IsolineFeature>;

/// Vector layer holding the current reachability feature set
pub struct ReachabilityLayer {
    properties: LayerProperties,
    features: IsolineSet,
    palette: [Color; 2],
    stroke_width: f32,
}

impl ReachabilityLayer {
    pub fn new(id: String, features: IsolineSet, palette: [Color; 2], stroke_width: f32) -> Self {
        Self {
            properties: LayerProperties::new(id, "Reachability".to_string(), LayerKind::Vector),
            features,
            palette,
            stroke_width,
        }
    }

    pub fn features(&self) -> &IsolineSet {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

impl Layer for ReachabilityLayer {
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

    fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;
        for feature in &self.features {
            if let Some(feature_bounds) = feature.bounds() {
                bounds = Some(match bounds {
                    Some(b) => b.union(&feature_bounds),
                    None => feature_bounds,
                });
            }
        }
        bounds
    }

    fn draw(&self, canvas: &mut dyn Canvas, viewport: &Viewport) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }

        for feature in &self.features {
            // Stroke is resolved from geometry on every redraw, not cached
            // at construction.
            let stroke = style::stroke_of(feature, &self.palette, self.stroke_width);

            for polygon in feature.polygons() {
                let mut rings: Vec<Vec<Point>> = Vec::with_capacity(1 + polygon.holes.len());
                rings.push(
                    polygon
                        .exterior
                        .iter()
                        .map(|p| viewport.lat_lng_to_pixel(p))
                        .collect(),
                );
                for hole in &polygon.holes {
                    rings.push(hole.iter().map(|p| viewport.lat_lng_to_pixel(p)).collect());
                }
                canvas.stroke_polygon(&rings, &stroke)?;
            }
        }

        Ok(())
    }
}

/// Owns the single current reachability overlay.
///
/// `refresh` is fire-and-forget: the query runs on a detached worker and
/// the gesture handler returns immediately. Completed feature sets arrive
/// over a channel and are applied in arrival order by `pump`, which
/// performs the atomic swap (add the new layer, then retire the previous
/// one) so the registry never holds two reachability overlays at once.
pub struct OverlayManager<S> {
    service: Arc<S>,
    tx: Sender<IsolineSet>,
    rx: Receiver<IsolineSet>,
    current_id: Option<String>,
    generation: u64,
    palette: [Color; 2],
    stroke_width: f32,
    overlay_zoom: f64,
}

impl<S: IsolineService + 'static> OverlayManager<S> {
    pub fn new(service: Arc<S>, palette: [Color; 2], stroke_width: f32, overlay_zoom: f64) -> Self {
        let (tx, rx) = unbounded();
        Self {
            service,
            tx,
            rx,
            current_id: None,
            generation: 0,
            palette,
            stroke_width,
            overlay_zoom,
        }
    }

    /// Issues an isochrone query for the clicked position. Failures are
    /// logged and otherwise swallowed: no swap happens and the prior
    /// overlay stays on screen.
    pub fn refresh(&self, pixel: Point, viewport: &Viewport, thresholds: &[u32]) {
        let point = viewport.pixel_to_lat_lng(&pixel);
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let thresholds = thresholds.to_vec();

        thread::spawn(move || {
            log::debug!(
                "isoline query at ({:.5}, {:.5}) thresholds {:?}",
                point.lng,
                point.lat,
                thresholds
            );
            match service.isolines(&point, &thresholds) {
                Ok(set) => {
                    log::info!("isoline query returned {} features", set.len());
                    let _ = tx.send(set);
                }
                Err(e) => log::warn!("isoline query failed: {}", e),
            }
        });
    }

    /// Applies arrived feature sets in arrival order. Each application
    /// swaps the overlay and sets the viewport to the fixed overlay zoom.
    pub fn pump(&mut self, registry: &mut LayerRegistry, viewport: &mut Viewport) -> bool {
        let arrived: Vec<IsolineSet> = self.rx.try_iter().collect();
        if arrived.is_empty() {
            return false;
        }

        for set in arrived {
            self.apply(set, registry, viewport);
        }
        true
    }

    fn apply(&mut self, set: IsolineSet, registry: &mut LayerRegistry, viewport: &mut Viewport) {
        self.generation += 1;
        let id = format!("reachability-{}", self.generation);
        let layer = ReachabilityLayer::new(id.clone(), set, self.palette, self.stroke_width);

        // Add before remove: the render target must never sample zero
        // overlays after a successful query.
        registry.add_layer(Box::new(layer));
        if let Some(previous) = self.current_id.take() {
            registry.remove_layer(&previous);
        }
        self.current_id = Some(id);

        viewport.set_zoom(self.overlay_zoom);
    }

    /// Removes the current overlay with no replacement. Idempotent.
    pub fn clear(&mut self, registry: &mut LayerRegistry) {
        if let Some(previous) = self.current_id.take() {
            registry.remove_layer(&previous);
        }
    }

    /// Registry id of the overlay currently displayed, if any
    pub fn current_layer_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }
}

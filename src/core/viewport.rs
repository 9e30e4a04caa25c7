use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS: f64 = 6378137.0;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 19.0),
            size,
            min_zoom: 0.0,
            max_zoom: 19.0,
            pixel_origin: None,
        }
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// using the standard Web Mercator projection (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        let mercator = lat_lng.to_mercator();
        let world = 2.0 * std::f64::consts::PI * EARTH_RADIUS;

        let pixel_x = (mercator.x + world / 2.0) / world * scale;
        let pixel_y = (-mercator.y + world / 2.0) / world * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);
        let world = 2.0 * std::f64::consts::PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - world / 2.0;
        let y = world / 2.0 - (pixel.y / scale) * world;

        LatLng::from_mercator(Point::new(x, y))
    }

    /// Gets or calculates the pixel origin for this viewport
    pub fn get_pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts a geographical coordinate to screen pixel coordinates (container relative)
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.lat_lng_to_layer_point(lat_lng);
        Point::new(
            layer_point.x + self.size.x / 2.0,
            layer_point.y + self.size.y / 2.0,
        )
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer_point = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        self.layer_point_to_lat_lng(&layer_point)
    }

    /// Converts LatLng to layer point (relative to pixel origin)
    pub fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        let projected_point = self.project(lat_lng, None);
        projected_point.subtract(&self.get_pixel_origin())
    }

    /// Converts layer point back to LatLng
    pub fn layer_point_to_lat_lng(&self, point: &Point) -> LatLng {
        let projected_point = point.add(&self.get_pixel_origin());
        self.unproject(&projected_point, None)
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

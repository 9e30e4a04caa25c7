use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Flattens the document into its features, in document order
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
        }
    }
}

/// Ring set of a single polygon: exterior ring plus any holes
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRings {
    pub exterior: Vec<LatLng>,
    pub holes: Vec<Vec<LatLng>>,
}

fn ring_to_lat_lng(ring: &[[f64; 2]]) -> Vec<LatLng> {
    // GeoJSON positions are [lon, lat]
    ring.iter().map(|c| LatLng::new(c[1], c[0])).collect()
}

fn polygon_from_rings(rings: &[Vec<[f64; 2]>]) -> Option<PolygonRings> {
    let (exterior, holes) = rings.split_first()?;
    Some(PolygonRings {
        exterior: ring_to_lat_lng(exterior),
        holes: holes.iter().map(|h| ring_to_lat_lng(h)).collect(),
    })
}

impl GeoJsonGeometry {
    /// Extracts the polygons of this geometry as LatLng ring sets.
    /// Non-areal geometries yield nothing.
    pub fn polygons(&self) -> Vec<PolygonRings> {
        match self {
            GeoJsonGeometry::Polygon { coordinates } => {
                polygon_from_rings(coordinates).into_iter().collect()
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .filter_map(|rings| polygon_from_rings(rings))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(|g| g.polygons()).collect()
            }
            _ => Vec::new(),
        }
    }
}

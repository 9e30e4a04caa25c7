use crate::clients::geocode::GeoapifyClient;
use crate::clients::HTTP_CLIENT;
use crate::core::geo::LatLng;
use crate::data::geojson::GeoJson;
use crate::layers::reachability::{IsolineFeature, IsolineSet};
use crate::Result;

/// Produces reachability polygons for a point and a set of thresholds.
/// Travel mode and metric are fixed: walking, time.
pub trait IsolineService: Send + Sync {
    fn isolines(&self, point: &LatLng, thresholds: &[u32]) -> Result<IsolineSet>;
}

/// Converts a GeoJSON document into the ordered isoline feature set,
/// keeping document order (one feature per threshold).
pub fn isoline_set_from_geojson(geojson: GeoJson) -> IsolineSet {
    geojson
        .into_features()
        .into_iter()
        .map(|feature| {
            let polygons = feature
                .geometry
                .as_ref()
                .map(|g| g.polygons())
                .unwrap_or_default();
            IsolineFeature::new(polygons, feature.properties.unwrap_or_default())
        })
        .collect()
}

impl IsolineService for GeoapifyClient {
    fn isolines(&self, point: &LatLng, thresholds: &[u32]) -> Result<IsolineSet> {
        let url = format!("{}/v1/isoline", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("lon", point.lng.to_string()),
            ("lat", point.lat.to_string()),
            ("type", "time".to_string()),
            ("mode", "walk".to_string()),
        ];
        for threshold in thresholds {
            query.push(("range", threshold.to_string()));
        }
        query.push(("apiKey", self.api_key.clone()));

        let resp = HTTP_CLIENT.get(&url).query(&query).send()?;
        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()).into());
        }

        let geojson: GeoJson = resp.json()?;
        Ok(isoline_set_from_geojson(geojson))
    }
}

//! Debug GeoJSON export for tile grids.
//!
//! Reshapes a [`TileGrid`] into a FeatureCollection with one polygon per
//! tile, handy for eyeballing coverage in any GeoJSON viewer.

use crate::tiler::TileGrid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry emitted by the debug export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: HashMap<String, serde_json::Value>,
}

/// Root GeoJSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Serializes the document to a JSON string
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds a FeatureCollection outlining every tile in the grid
///
/// Each feature carries the tile's geographic extent as a closed polygon
/// ring and its id under both the `id` and `name` properties.
pub fn debug_geojson(grid: &TileGrid) -> FeatureCollection {
    let features = grid
        .iter()
        .map(|tile| {
            let ring: Vec<[f64; 2]> = tile
                .wgs84_extent
                .polygon()
                .iter()
                .map(|p| [p.x, p.y])
                .collect();

            let id = serde_json::Value::String(tile.id.clone());
            let mut properties = HashMap::new();
            properties.insert("id".to_string(), id.clone());
            properties.insert("name".to_string(), id);

            Feature {
                geometry: Geometry::Polygon {
                    coordinates: vec![ring],
                },
                properties,
            }
        })
        .collect();

    FeatureCollection { features }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{LatLng, Point};
    use crate::core::projection::Projection;
    use crate::tiler::Tiler;

    fn world_grid() -> TileGrid {
        let proj = Projection::for_viewport(
            &LatLng::default(),
            1.0,
            Point::new(512.0, 512.0),
            256.0,
        );
        Tiler::new().cover(&proj)
    }

    #[test]
    fn test_one_feature_per_tile() {
        let grid = world_grid();
        let doc = debug_geojson(&grid);
        assert_eq!(doc.features.len(), grid.len());
    }

    #[test]
    fn test_feature_properties_carry_tile_id() {
        let doc = debug_geojson(&world_grid());

        for feature in &doc.features {
            let id = feature.properties.get("id").unwrap();
            let name = feature.properties.get("name").unwrap();
            assert_eq!(id, name);
            assert!(id.as_str().unwrap().ends_with(",1"));
        }
    }

    #[test]
    fn test_rings_are_closed() {
        let doc = debug_geojson(&world_grid());

        for feature in &doc.features {
            let Geometry::Polygon { coordinates } = &feature.geometry;
            let ring = &coordinates[0];
            assert_eq!(ring.len(), 5);
            assert_eq!(ring.first(), ring.last());
        }
    }

    #[test]
    fn test_document_shape() {
        let doc = debug_geojson(&world_grid());
        let json: serde_json::Value =
            serde_json::from_str(&doc.to_json_string().unwrap()).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn test_empty_grid_exports_empty_collection() {
        let doc = debug_geojson(&TileGrid::default());
        assert!(doc.features.is_empty());
        let json = doc.to_json_string().unwrap();
        assert!(json.contains("\"features\":[]"));
    }
}

pub mod geojson;

pub use geojson::{debug_geojson, Feature, FeatureCollection, Geometry};

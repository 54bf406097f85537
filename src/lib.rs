//! # Tilecover
//!
//! Computes which slippy-map tiles cover a projected viewport.
//!
//! Given a Web Mercator projection state (translation, scale factor, pixel
//! dimensions), a [`Tiler`] snaps the fractional zoom implied by the scale to
//! an integer level, enumerates the tile grid covering the viewport plus an
//! optional margin, and reports each tile's pixel extent, geographic extent
//! and visibility. The crate only decides *which* tiles and *where* they sit;
//! fetching, caching and rendering are left to the caller.

pub mod core;
pub mod data;
pub mod tiler;

// Re-export public API
pub use crate::core::{
    extent::Extent,
    geo::{LatLng, Point, TileCoord},
    projection::{scale_to_zoom, zoom_to_scale, Projection},
};

pub use data::geojson::{debug_geojson, Feature, FeatureCollection, Geometry};

pub use tiler::{Tile, TileGrid, Tiler};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TileError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid tile id: {0}")]
    InvalidTileId(String),
}

/// Error type alias for convenience
pub type Error = TileError;

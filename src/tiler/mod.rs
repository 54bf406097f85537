//! Tile-grid enumeration for a projected viewport.
//!
//! A [`Tiler`] snaps the fractional zoom implied by a projection's scale to
//! an integer level, walks the tile grid covering the viewport plus an
//! optional margin, and reports each tile's pixel extent, geographic extent
//! and visibility. Visible tiles sort ahead of margin tiles so callers can
//! service on-screen requests first.

use crate::core::extent::Extent;
use crate::core::geo::{Point, TileCoord};
use crate::core::projection::{self, Projection};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Default square tile size in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Default inclusive zoom extent.
pub const DEFAULT_ZOOM_EXTENT: (u8, u8) = (0, 24);

/// Highest zoom level the tiler will enumerate at. Tile indices stay within
/// u32 below this bound.
pub const MAX_ZOOM: u8 = 30;

/// A tile enumerated for one viewport query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Canonical "x,y,z" rendering of the coordinate, stable as a cache key
    pub id: String,
    pub xyz: TileCoord,
    /// Extent in world pixels at the snapped zoom level
    pub px_extent: Extent,
    /// Extent in degrees, x = longitude and y = latitude
    pub wgs84_extent: Extent,
    /// Whether the tile overlaps the viewport rather than only the margin
    pub is_visible: bool,
}

/// Ordered result of one coverage query, visible tiles first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileGrid {
    pub tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }
}

/// Computes the set of tiles covering a projected viewport
///
/// Each instance owns its configuration; queries never mutate it, so a
/// `Tiler` shared across threads only needs synchronization while its
/// setters are being called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiler {
    tile_size: u32,
    zoom_extent: (u8, u8),
    margin: u32,
    skip_null_island: bool,
}

impl Default for Tiler {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            zoom_extent: DEFAULT_ZOOM_EXTENT,
            margin: 0,
            skip_null_island: false,
        }
    }
}

impl Tiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Sets the square tile size in pixels, kept positive
    pub fn set_tile_size(&mut self, size: u32) {
        self.tile_size = size.max(1);
    }

    pub fn zoom_extent(&self) -> (u8, u8) {
        self.zoom_extent
    }

    /// Sets the inclusive zoom range, normalizing the bound order and
    /// capping at [`MAX_ZOOM`]
    pub fn set_zoom_extent(&mut self, min: u8, max: u8) {
        let min = min.min(MAX_ZOOM);
        let max = max.min(MAX_ZOOM);
        self.zoom_extent = (min.min(max), min.max(max));
    }

    /// Pins both zoom bounds to a single level
    pub fn set_zoom(&mut self, zoom: u8) {
        self.set_zoom_extent(zoom, zoom);
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Sets the count of extra tile rows and columns enumerated beyond the
    /// viewport on each side
    pub fn set_margin(&mut self, margin: u32) {
        self.margin = margin;
    }

    pub fn skip_null_island(&self) -> bool {
        self.skip_null_island
    }

    /// When set, tiles near the geographic origin are excluded from results
    pub fn set_skip_null_island(&mut self, skip: bool) {
        self.skip_null_island = skip;
    }

    pub fn with_tile_size(mut self, size: u32) -> Self {
        self.set_tile_size(size);
        self
    }

    pub fn with_zoom_extent(mut self, min: u8, max: u8) -> Self {
        self.set_zoom_extent(min, max);
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.set_margin(margin);
        self
    }

    pub fn with_skip_null_island(mut self, skip: bool) -> Self {
        self.set_skip_null_island(skip);
        self
    }

    /// Enumerates the tiles covering the projected viewport
    ///
    /// Always returns a grid; a degenerate projection (non-positive or
    /// non-finite scale) yields an empty one rather than an error.
    pub fn cover(&self, proj: &Projection) -> TileGrid {
        let scale = proj.scale();
        if !scale.is_finite() || scale <= 0.0 {
            return TileGrid::default();
        }

        let tile_size = f64::from(self.tile_size);
        let (min_zoom, max_zoom) = self.zoom_extent;

        let z_frac = projection::scale_to_zoom(scale, tile_size);
        let z = z_frac
            .round()
            .clamp(f64::from(min_zoom), f64::from(max_zoom)) as u8;
        let tile_max = (1u32 << z) - 1;

        // Pixel span of one tile-grid unit at the viewport's true
        // fractional scale, not the snapped zoom's nominal scale.
        let k = 2f64.powf(z_frac - f64::from(z) + tile_size.log2());

        // World-pixel origin of the untranslated Mercator square.
        let translate = proj.translate();
        let origin = Point::new(scale * PI - translate.x, scale * PI - translate.y);
        let dimensions = proj.dimensions();
        let view = Extent::new(
            origin.add(&dimensions.min),
            origin.add(&dimensions.max),
        );

        // Centered projection over the untranslated world at the snapped
        // zoom, rebuilt per query, used only to invert tile corners.
        let world_half = 2f64.powi(i32::from(z)) / 2.0 * tile_size;
        let centered = Projection::new(
            Point::new(world_half, world_half),
            projection::zoom_to_scale(f64::from(z), tile_size),
        );

        let margin = i64::from(self.margin);
        let col_min = clamp_index((view.min.x / k).floor() as i64 - margin, tile_max);
        let col_max = clamp_index((view.max.x / k).floor() as i64 + margin, tile_max);
        let row_min = clamp_index((view.min.y / k).floor() as i64 - margin, tile_max);
        let row_max = clamp_index((view.max.y / k).floor() as i64 + margin, tile_max);

        #[cfg(feature = "debug")]
        log::trace!(
            "covering z={} (z_frac={:.3}) cols {}..={} rows {}..={}",
            z, z_frac, col_min, col_max, row_min, row_max
        );

        let mut tiles: VecDeque<Tile> = VecDeque::new();
        for y in row_min..=row_max {
            for x in col_min..=col_max {
                if self.skip_null_island && Self::is_near_null_island(x, y, z) {
                    continue;
                }

                let px_extent = Extent::from_coords(
                    f64::from(x) * tile_size,
                    f64::from(y) * tile_size,
                    f64::from(x + 1) * tile_size,
                    f64::from(y + 1) * tile_size,
                );
                let is_visible = px_extent.intersects(&view);

                // Opposite pixel corners with y swapped, since pixel y grows
                // downward while latitude grows upward.
                let sw = centered.invert(&Point::new(px_extent.min.x, px_extent.max.y));
                let ne = centered.invert(&Point::new(px_extent.max.x, px_extent.min.y));
                let wgs84_extent = Extent::new(sw.to_point(), ne.to_point());

                let xyz = TileCoord::new(x, y, z);
                let tile = Tile {
                    id: xyz.to_string(),
                    xyz,
                    px_extent,
                    wgs84_extent,
                    is_visible,
                };

                if is_visible {
                    tiles.push_front(tile);
                } else {
                    tiles.push_back(tile);
                }
            }
        }

        #[cfg(feature = "debug")]
        log::debug!("covered viewport with {} tiles at z{}", tiles.len(), z);

        TileGrid {
            tiles: tiles.into(),
        }
    }

    /// Checks whether a tile sits in the exclusion square around the
    /// geographic origin, a common landing spot for corrupt geodata
    ///
    /// Below zoom 7 the region is too coarse to exclude. From zoom 7 up the
    /// square is `2^(z-6)` tiles wide centered on the origin, so it always
    /// spans the same few degrees.
    pub fn is_near_null_island(x: u32, y: u32, z: u8) -> bool {
        if z < 7 || z > MAX_ZOOM {
            return false;
        }
        let center = 1u32 << (z - 1);
        let width = 1u32 << (z - 6);
        let min = center - width / 2;
        let max = center + width / 2 - 1;
        x >= min && x <= max && y >= min && y <= max
    }
}

fn clamp_index(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

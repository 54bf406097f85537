//! Web Mercator projection state and the scale/zoom relationship.
//!
//! The scale factor follows the d3 convention: a projection at scale `s`
//! renders the whole world `s * 2π` pixels wide, so a scale of
//! `tile_size * 2^z / 2π` shows exactly `2^z` tiles across.

use crate::core::extent::Extent;
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Converts a projection scale factor to the fractional zoom level it
/// implies for the given tile size
pub fn scale_to_zoom(scale: f64, tile_size: f64) -> f64 {
    (scale * TAU / tile_size).log2()
}

/// Converts a zoom level to the projection scale factor that renders it at
/// the given tile size
pub fn zoom_to_scale(zoom: f64, tile_size: f64) -> f64 {
    tile_size * 2f64.powf(zoom) / TAU
}

/// Web Mercator viewport state: pixel translation, scale factor and screen
/// dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    translate: Point,
    scale: f64,
    dimensions: Extent,
}

impl Projection {
    /// Creates a projection with zero-area dimensions
    pub fn new(translate: Point, scale: f64) -> Self {
        Self {
            translate,
            scale,
            dimensions: Extent::default(),
        }
    }

    /// Sets the viewport pixel dimensions
    pub fn with_dimensions(mut self, dimensions: Extent) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Creates the projection for a viewport of `size` pixels centered on a
    /// geographic coordinate at the given zoom level
    pub fn for_viewport(center: &LatLng, zoom: f64, size: Point, tile_size: f64) -> Self {
        let scale = zoom_to_scale(zoom, tile_size);
        let projected = Self::new(Point::default(), scale).project(center);
        let translate = Point::new(size.x / 2.0 - projected.x, size.y / 2.0 - projected.y);
        Self::new(translate, scale)
            .with_dimensions(Extent::new(Point::default(), size))
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn dimensions(&self) -> &Extent {
        &self.dimensions
    }

    pub fn set_translate(&mut self, translate: Point) {
        self.translate = translate;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn set_dimensions(&mut self, dimensions: Extent) {
        self.dimensions = dimensions;
    }

    /// Projects a geographic coordinate to pixel coordinates
    ///
    /// Latitude is clamped to the Mercator-projectable range first, so the
    /// poles map to finite pixel values.
    pub fn project(&self, loc: &LatLng) -> Point {
        let lambda = loc.lng.to_radians();
        let phi = LatLng::clamp_lat(loc.lat).to_radians();
        let merc_y = (PI / 4.0 + phi / 2.0).tan().ln();
        Point::new(
            lambda * self.scale + self.translate.x,
            self.translate.y - merc_y * self.scale,
        )
    }

    /// Inverts pixel coordinates back to a geographic coordinate
    pub fn invert(&self, point: &Point) -> LatLng {
        let lambda = (point.x - self.translate.x) / self.scale;
        let merc_y = (self.translate.y - point.y) / self.scale;
        let phi = 2.0 * merc_y.exp().atan() - PI / 2.0;
        LatLng::new(phi.to_degrees(), lambda.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_zoom_round_trip() {
        for z in 0..20 {
            let zoom = z as f64;
            let back = scale_to_zoom(zoom_to_scale(zoom, 256.0), 256.0);
            assert!((back - zoom).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scale_zoom_other_tile_sizes() {
        let back = scale_to_zoom(zoom_to_scale(5.0, 512.0), 512.0);
        assert!((back - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_invert_round_trip() {
        let projection = Projection::new(Point::new(256.0, 256.0), zoom_to_scale(4.0, 256.0));
        let loc = LatLng::new(40.7128, -74.0060);

        let back = projection.invert(&projection.project(&loc));
        assert!((back.lat - loc.lat).abs() < 1e-9);
        assert!((back.lng - loc.lng).abs() < 1e-9);
    }

    #[test]
    fn test_for_viewport_centers_the_location() {
        let center = LatLng::new(37.7749, -122.4194);
        let projection = Projection::for_viewport(&center, 12.0, Point::new(800.0, 600.0), 256.0);

        let projected = projection.project(&center);
        assert!((projected.x - 400.0).abs() < 1e-9);
        assert!((projected.y - 300.0).abs() < 1e-9);
        assert_eq!(projection.dimensions().max, Point::new(800.0, 600.0));
    }

    #[test]
    fn test_world_projection_edges() {
        // Whole world in a 512px viewport at zoom 1
        let projection = Projection::new(Point::new(256.0, 256.0), zoom_to_scale(1.0, 256.0))
            .with_dimensions(Extent::from_coords(0.0, 0.0, 512.0, 512.0));

        let west = projection.invert(&Point::new(0.0, 256.0));
        assert!((west.lng - -180.0).abs() < 1e-9);
        assert!(west.lat.abs() < 1e-9);

        let north = projection.invert(&Point::new(256.0, 0.0));
        assert!((north.lat - 85.0511287798).abs() < 1e-6);
        assert!(north.lng.abs() < 1e-9);
    }
}

use crate::TileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Latitude limit of the Web Mercator projection
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the Mercator-projectable range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to a Point with x = longitude and y = latitude
    pub fn to_point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    /// Linear interpolation between this point and another at parameter t
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.subtract(other).length()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle of the vector from this point to another, in radians
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Projects this point onto the segment from `a` to `b`, clamped to the
    /// segment's endpoints
    pub fn project_onto_segment(&self, a: &Point, b: &Point) -> Point {
        let ab = b.subtract(a);
        let len2 = ab.dot(&ab);
        if len2 == 0.0 {
            return *a;
        }
        let t = (self.subtract(a).dot(&ab) / len2).clamp(0.0, 1.0);
        a.add(&ab.multiply(t))
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Checks if the tile indices are in range for the zoom level
    pub fn is_valid(&self) -> bool {
        if self.z > 30 {
            return false;
        }
        let max_coord = 1u32 << self.z;
        self.x < max_coord && self.y < max_coord
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for TileCoord {
    type Err = TileError;

    /// Parses the canonical "x,y,z" rendering produced by `Display`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TileError::InvalidTileId(s.to_string());
        let mut parts = s.split(',');
        let x = parts.next().and_then(|p| p.trim().parse().ok()).ok_or_else(invalid)?;
        let y = parts.next().and_then(|p| p.trim().parse().ok()).ok_or_else(invalid)?;
        let z = parts.next().and_then(|p| p.trim().parse().ok()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        let coord = TileCoord::new(x, y, z);
        if !coord.is_valid() {
            return Err(invalid());
        }
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_wrap_lng() {
        assert_eq!(LatLng::wrap_lng(190.0), -170.0);
        assert_eq!(LatLng::wrap_lng(-190.0), 170.0);
        assert_eq!(LatLng::wrap_lng(45.0), 45.0);
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);

        assert_eq!(a.add(&b), Point::new(5.0, 8.0));
        assert_eq!(b.subtract(&a), Point::new(3.0, 4.0));
        assert_eq!(b.subtract(&a).length(), 5.0);
        assert_eq!(a.dot(&b), 16.0);
        assert_eq!(a.cross(&b), -2.0);
        assert_eq!(a.lerp(&b, 0.5), Point::new(2.5, 4.0));
    }

    #[test]
    fn test_project_onto_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        let mid = Point::new(5.0, 3.0).project_onto_segment(&a, &b);
        assert_eq!(mid, Point::new(5.0, 0.0));

        // Beyond the endpoint clamps to it
        let past = Point::new(15.0, 3.0).project_onto_segment(&a, &b);
        assert_eq!(past, b);

        // Degenerate segment collapses to its single point
        let degenerate = Point::new(5.0, 5.0).project_onto_segment(&a, &a);
        assert_eq!(degenerate, a);
    }

    #[test]
    fn test_tile_coord_id_round_trip() {
        let coord = TileCoord::new(3, 5, 7);
        let id = coord.to_string();
        assert_eq!(id, "3,5,7");
        assert_eq!(id.parse::<TileCoord>().unwrap(), coord);
    }

    #[test]
    fn test_tile_coord_parse_rejects_malformed() {
        assert!("1,2".parse::<TileCoord>().is_err());
        assert!("1,2,3,4".parse::<TileCoord>().is_err());
        assert!("a,b,c".parse::<TileCoord>().is_err());
        // x out of range for z=2
        assert!("5,1,2".parse::<TileCoord>().is_err());
    }

    #[test]
    fn test_tile_coord_validity() {
        assert!(TileCoord::new(0, 0, 0).is_valid());
        assert!(TileCoord::new(3, 3, 2).is_valid());
        assert!(!TileCoord::new(4, 0, 2).is_valid());
        assert!(!TileCoord::new(0, 4, 2).is_valid());
    }
}

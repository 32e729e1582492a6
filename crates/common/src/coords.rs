//! # Coordinate Transforms
//!
//! Maps geographic coordinates (WGS84 lat/lng) to the local planar frame used
//! by the 3D scene. Local coordinates are meters on the XZ plane relative to a
//! fixed origin; Y is reserved for height above ground.
//!
//! ## Table of Contents
//! 1. GeoPoint / GeoBounds — geographic primitives
//! 2. GeoOrigin — local frame origin
//! 3. project — equirectangular projection
//! 4. Distance helpers

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ============================================================================
// 1. GeoPoint / GeoBounds — geographic primitives
// ============================================================================

/// A geographic coordinate (WGS84 degrees).
/// Serializes as a `[lat, lng]` pair to match the export wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from(pair: (f64, f64)) -> Self {
        Self { lat: pair.0, lng: pair.1 }
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lng)
    }
}

/// A geographic bounding box: south/west/north/east edges in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub const fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self { south, west, north, east }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) * 0.5,
            (self.west + self.east) * 0.5,
        )
    }
}

// ============================================================================
// 2. GeoOrigin — local frame origin
// ============================================================================

/// Geographic center of Santiago, the default projection origin
pub const SANTIAGO_CENTER: GeoPoint = GeoPoint::new(-33.4489, -70.6693);

/// The geographic origin of the local planar frame.
/// All projected coordinates are meters relative to this point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoOrigin {
    /// Origin latitude (degrees)
    pub lat: f64,
    /// Origin longitude (degrees)
    pub lng: f64,
}

impl GeoOrigin {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for GeoOrigin {
    fn default() -> Self {
        Self::new(SANTIAGO_CENTER.lat, SANTIAGO_CENTER.lng)
    }
}

impl From<GeoPoint> for GeoOrigin {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.lat, point.lng)
    }
}

// ============================================================================
// 3. project — equirectangular projection
// ============================================================================

/// Meters per degree of latitude
const LAT_SCALE: f64 = 111_000.0;

/// Project a geographic coordinate into the local planar frame.
///
/// Equirectangular approximation: longitude is scaled by the cosine of the
/// origin latitude, valid for city-sized regions. Returns `(x, z)` where +x
/// is east and +z is south of the origin. `project(origin, origin) == (0, 0)`.
///
/// This is the single shared projection — every call site (map markers, 3D
/// placement, street paths, labels, LOD distances) goes through here.
pub fn project(point: GeoPoint, origin: &GeoOrigin) -> Vec2 {
    let lng_scale = LAT_SCALE * origin.lat.to_radians().cos();
    let x = (point.lng - origin.lng) * lng_scale;
    let z = (origin.lat - point.lat) * LAT_SCALE;
    Vec2::new(x as f32, z as f32)
}

// ============================================================================
// 4. Distance helpers
// ============================================================================

/// Euclidean distance on the ground (XZ) plane, ignoring height
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

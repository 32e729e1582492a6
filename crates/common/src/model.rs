//! # Entity Model
//!
//! Buildings and streets as produced by ingestion, plus the deterministic
//! color and footprint rules. Repeated ingestions of the same raw features
//! must yield byte-identical entities, so nothing here draws from ambient
//! randomness.
//!
//! ## Table of Contents
//! 1. Building — footprint entity
//! 2. Building colors — fixed table + stable hash fallback
//! 3. StreetClass — road classification table
//! 4. Street — centerline entity

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::coords::{project, GeoOrigin, GeoPoint};

// ============================================================================
// 1. Building — footprint entity
// ============================================================================

/// Default building height in meters when no tag resolves
pub const DEFAULT_BUILDING_HEIGHT: f32 = 10.0;

/// A building footprint reduced to a placed box.
/// Wire format matches the JSON export: camelCase keys, `type` for the kind
/// tag, coordinates as a `[lat, lng]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    /// Unique id: `osm-{way_id}` for ingested, `building-{uuid}` for hand-placed
    pub id: String,
    pub name: String,
    /// Local position: x/z from the projection, y = height / 2
    pub position: Vec3,
    /// Euler angles (radians), mutated only by the editor collaborator
    pub rotation: Vec3,
    pub scale: Vec3,
    pub height: f32,
    pub width: f32,
    pub depth: f32,
    /// CSS color, a deterministic function of kind or id
    pub color: String,
    /// Geographic coordinate (centroid of the source way)
    pub coordinates: GeoPoint,
    /// Resolved building kind ("residential", "office", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Construction year, when the source way carries one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub year: Option<i32>,
    /// Distance to camera, recomputed on movement end in 3D mode only.
    /// Never serialized; stale values are never consulted in 2D mode.
    #[serde(skip)]
    pub distance: Option<f32>,
}

/// Where a building came from; decides whether editor transforms apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingOrigin {
    /// Ingested from the geodata provider
    Osm,
    /// Created or imported through the editor collaborator
    User,
}

impl Building {
    /// Build an entity from a resolved OSM way.
    pub fn from_osm(
        way_id: i64,
        name: Option<String>,
        coordinates: GeoPoint,
        height: f32,
        kind: String,
        year: Option<i32>,
    ) -> Self {
        let id = format!("osm-{way_id}");
        let color = color_for_kind(&kind, &id);
        let (width, depth) = footprint_for_id(&id);
        Self {
            id,
            name: name.unwrap_or_else(|| format!("Building {way_id}")),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            height,
            width,
            depth,
            color,
            coordinates,
            kind,
            year,
            distance: None,
        }
    }

    /// Hand-placed building created through the editor collaborator.
    pub fn user_created(name: String, coordinates: GeoPoint) -> Self {
        let id = format!("building-{}", uuid::Uuid::new_v4());
        let color = fallback_color(&id);
        let (width, depth) = footprint_for_id(&id);
        Self {
            id,
            name,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            height: DEFAULT_BUILDING_HEIGHT,
            width,
            depth,
            color,
            coordinates,
            kind: "custom".to_string(),
            year: None,
            distance: None,
        }
    }

    pub fn origin(&self) -> BuildingOrigin {
        if self.id.starts_with("osm-") {
            BuildingOrigin::Osm
        } else {
            BuildingOrigin::User
        }
    }

    pub fn is_user_created(&self) -> bool {
        self.origin() == BuildingOrigin::User
    }

    /// Local position derived from the shared projection: box center sits at
    /// half the height so the base rests on the ground plane.
    pub fn local_position(&self, origin: &GeoOrigin) -> Vec3 {
        let Vec2 { x, y: z } = project(self.coordinates, origin);
        Vec3::new(x, self.height * 0.5, z)
    }
}

// ============================================================================
// 2. Building colors — fixed table + stable hash fallback
// ============================================================================

/// Sum of the character codes of an id string. Tiny, but stable across runs,
/// which is all the fallback color needs.
fn id_hash(id: &str) -> u32 {
    id.chars().map(|c| c as u32).sum()
}

/// Stable fallback color for unclassified kinds and hand-placed buildings:
/// the id hash picks a hue, saturation/lightness are fixed.
pub fn fallback_color(id: &str) -> String {
    format!("hsl({}, 70%, 60%)", id_hash(id) % 360)
}

/// The five-category color table; anything else falls back to the id hue.
pub fn color_for_kind(kind: &str, id: &str) -> String {
    match kind {
        "residential" | "apartments" => "#4682B4".to_string(), // steel blue
        "commercial" | "retail" => "#CD5C5C".to_string(),      // indian red
        "industrial" => "#708090".to_string(),                 // slate gray
        "office" => "#4169E1".to_string(),                     // royal blue
        "public" | "civic" => "#9370DB".to_string(),           // medium purple
        _ => fallback_color(id),
    }
}

/// Deterministic footprint in the 5–15 m range, derived from the id so the
/// same way always yields the same box.
pub fn footprint_for_id(id: &str) -> (f32, f32) {
    let hash = id_hash(id);
    let width = 5.0 + (hash % 100) as f32 * 0.1;
    let depth = 5.0 + (hash / 100 % 100) as f32 * 0.1;
    (width, depth)
}

// ============================================================================
// 3. StreetClass — road classification table
// ============================================================================

/// Width and color for highway values outside the four ingested classes
pub const UNCLASSIFIED_STREET_WIDTH: f32 = 5.0;
pub const UNCLASSIFIED_STREET_COLOR: &str = "#A9A9A9"; // dark gray

/// The four ingested road classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreetClass {
    Primary,
    Secondary,
    Tertiary,
    Residential,
}

impl StreetClass {
    /// Parse an OSM `highway` tag value
    pub fn from_highway(value: &str) -> Option<Self> {
        match value {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "tertiary" => Some(Self::Tertiary),
            "residential" => Some(Self::Residential),
            _ => None,
        }
    }

    pub fn width(self) -> f32 {
        match self {
            Self::Primary => 12.0,
            Self::Secondary => 10.0,
            Self::Tertiary => 8.0,
            Self::Residential => 6.0,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Primary => "#FFA500",     // orange
            Self::Secondary => "#FFFF00",   // yellow
            Self::Tertiary => "#FFFFFF",    // white
            Self::Residential => "#D3D3D3", // light gray
        }
    }

    /// Primary and secondary streets: always rendered, eligible for labels
    pub fn is_major(self) -> bool {
        matches!(self, Self::Primary | Self::Secondary)
    }
}

// ============================================================================
// 4. Street — centerline entity
// ============================================================================

/// A street centerline with its full ordered point sequence (never reduced
/// to a centroid; invariant: at least two points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Street {
    /// Unique id: `street-{way_id}`
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub points: Vec<GeoPoint>,
    pub width: f32,
    #[serde(rename = "type")]
    pub class: StreetClass,
    pub color: String,
}

impl Street {
    /// Build an entity from a resolved OSM way. Highway values outside the
    /// four ingested classes keep residential semantics but get the narrower
    /// unclassified visual parameters.
    pub fn from_osm(way_id: i64, name: Option<String>, points: Vec<GeoPoint>, highway: &str) -> Self {
        let (class, width, color) = match StreetClass::from_highway(highway) {
            Some(class) => (class, class.width(), class.color().to_string()),
            None => (
                StreetClass::Residential,
                UNCLASSIFIED_STREET_WIDTH,
                UNCLASSIFIED_STREET_COLOR.to_string(),
            ),
        };
        Self {
            id: format!("street-{way_id}"),
            name,
            points,
            width,
            class,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn osm_building(kind: &str) -> Building {
        Building::from_osm(
            4207,
            Some("Test".to_string()),
            GeoPoint::new(-33.44, -70.65),
            12.0,
            kind.to_string(),
            None,
        )
    }

    #[test]
    fn test_color_table() {
        assert_eq!(osm_building("residential").color, "#4682B4");
        assert_eq!(osm_building("apartments").color, "#4682B4");
        assert_eq!(osm_building("commercial").color, "#CD5C5C");
        assert_eq!(osm_building("retail").color, "#CD5C5C");
        assert_eq!(osm_building("industrial").color, "#708090");
        assert_eq!(osm_building("office").color, "#4169E1");
        assert_eq!(osm_building("public").color, "#9370DB");
        assert_eq!(osm_building("civic").color, "#9370DB");
    }

    #[test]
    fn test_fallback_color_is_stable() {
        let a = osm_building("warehouse");
        let b = osm_building("warehouse");
        assert_eq!(a.color, b.color);
        assert!(a.color.starts_with("hsl("));
        assert!(a.color.ends_with(", 70%, 60%)"));
    }

    #[test]
    fn test_fallback_hue_is_char_code_sum() {
        // "ab" -> 97 + 98 = 195
        assert_eq!(fallback_color("ab"), "hsl(195, 70%, 60%)");
    }

    #[test]
    fn test_footprint_is_deterministic_and_bounded() {
        let (w1, d1) = footprint_for_id("osm-4207");
        let (w2, d2) = footprint_for_id("osm-4207");
        assert_eq!((w1, d1), (w2, d2));
        assert!((5.0..15.0).contains(&w1));
        assert!((5.0..15.0).contains(&d1));
    }

    #[test]
    fn test_origin_from_id_prefix() {
        let ingested = osm_building("office");
        assert_eq!(ingested.origin(), BuildingOrigin::Osm);
        assert!(!ingested.is_user_created());

        let created = Building::user_created("Mine".to_string(), GeoPoint::new(-33.44, -70.65));
        assert_eq!(created.origin(), BuildingOrigin::User);
        assert!(created.id.starts_with("building-"));
        assert_eq!(created.height, DEFAULT_BUILDING_HEIGHT);
    }

    #[test]
    fn test_local_position_centers_box_at_half_height() {
        let origin = GeoOrigin::default();
        let building = osm_building("office");
        let position = building.local_position(&origin);
        assert_eq!(position.y, 6.0);
        // Away from the origin the ground offsets are nonzero
        assert!(position.x.abs() > 0.0);
        assert!(position.z.abs() > 0.0);
    }

    #[test]
    fn test_street_class_table() {
        assert_eq!(StreetClass::Primary.width(), 12.0);
        assert_eq!(StreetClass::Primary.color(), "#FFA500");
        assert_eq!(StreetClass::Secondary.width(), 10.0);
        assert_eq!(StreetClass::Secondary.color(), "#FFFF00");
        assert_eq!(StreetClass::Tertiary.width(), 8.0);
        assert_eq!(StreetClass::Tertiary.color(), "#FFFFFF");
        assert_eq!(StreetClass::Residential.width(), 6.0);
        assert_eq!(StreetClass::Residential.color(), "#D3D3D3");
    }

    #[test]
    fn test_unclassified_highway_defaults() {
        let points = vec![GeoPoint::new(-33.44, -70.65), GeoPoint::new(-33.45, -70.66)];
        let street = Street::from_osm(7, None, points, "living_street");
        assert_eq!(street.class, StreetClass::Residential);
        assert_eq!(street.width, UNCLASSIFIED_STREET_WIDTH);
        assert_eq!(street.color, UNCLASSIFIED_STREET_COLOR);
    }
}

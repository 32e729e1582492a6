//! # Level-of-Detail Classification
//!
//! Maps a camera distance to a rendering detail tier. The thresholds form an
//! exact partition of `[0, ∞)`: nothing is both excluded and classified, and
//! every finite distance lands in exactly one bucket.

use serde::{Deserialize, Serialize};

use crate::model::Building;

/// Geometric detail the renderer should use for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    High,
    Medium,
    Low,
}

/// Classify a camera distance against a culling radius.
///
/// `None` means the entity is excluded from the render set entirely (it stays
/// in the logical collections). Within the radius: the nearest 30% renders at
/// high detail, up to 60% at medium, the remainder at low.
pub fn classify(distance: f32, max_distance: f32) -> Option<DetailLevel> {
    if distance > max_distance {
        None
    } else if distance <= max_distance * 0.3 {
        Some(DetailLevel::High)
    } else if distance <= max_distance * 0.6 {
        Some(DetailLevel::Medium)
    } else {
        Some(DetailLevel::Low)
    }
}

/// Classify a building by its recorded camera distance. A building whose
/// distance was never computed (e.g. before the first 3D movement) ranks as
/// closest.
pub fn classify_building(building: &Building, max_distance: f32) -> Option<DetailLevel> {
    classify(building.distance.unwrap_or(0.0), max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::GeoPoint;

    #[test]
    fn test_partition_at_max_distance_1000() {
        assert_eq!(classify(250.0, 1000.0), Some(DetailLevel::High));
        assert_eq!(classify(500.0, 1000.0), Some(DetailLevel::Medium));
        assert_eq!(classify(900.0, 1000.0), Some(DetailLevel::Low));
        assert_eq!(classify(1001.0, 1000.0), None);
    }

    #[test]
    fn test_threshold_boundaries() {
        // Boundaries belong to the nearer bucket
        assert_eq!(classify(0.0, 1000.0), Some(DetailLevel::High));
        assert_eq!(classify(300.0, 1000.0), Some(DetailLevel::High));
        assert_eq!(classify(600.0, 1000.0), Some(DetailLevel::Medium));
        assert_eq!(classify(1000.0, 1000.0), Some(DetailLevel::Low));
    }

    #[test]
    fn test_unknown_distance_ranks_closest() {
        let mut building = Building::from_osm(
            1,
            None,
            GeoPoint::new(-33.44, -70.65),
            10.0,
            "office".to_string(),
            None,
        );
        assert_eq!(building.distance, None);
        assert_eq!(classify_building(&building, 1000.0), Some(DetailLevel::High));

        building.distance = Some(2000.0);
        assert_eq!(classify_building(&building, 1000.0), None);
    }
}

//! # Quality Profiles
//!
//! Named render-cost budgets. Switching tiers triggers a full re-ingestion of
//! the active district, after which the building list is truncated to the
//! tier's entity cap.
//!
//! ## Table of Contents
//! 1. QualityTier — the three named tiers
//! 2. QualityProfile / QualityProfiles — per-tier budgets

use serde::{Deserialize, Serialize};

use crate::model::Building;

// ============================================================================
// 1. QualityTier — the three named tiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    #[default]
    Medium,
    High,
}

// ============================================================================
// 2. QualityProfile / QualityProfiles — per-tier budgets
// ============================================================================

/// Budgets exposed by one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Entity cap applied after ingestion, in ingestion order
    pub max_buildings: usize,
    /// Culling radius for the LOD classifier, in meters
    pub max_distance: f32,
    /// Number of geometric detail steps the renderer may use (informational)
    pub lod_levels: u32,
}

impl QualityProfile {
    const fn new(max_buildings: usize, max_distance: f32, lod_levels: u32) -> Self {
        Self {
            max_buildings,
            max_distance,
            lod_levels,
        }
    }
}

/// All three tier profiles; overridable from `urbe.toml`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityProfiles {
    pub low: QualityProfile,
    pub medium: QualityProfile,
    pub high: QualityProfile,
}

impl Default for QualityProfiles {
    fn default() -> Self {
        Self {
            low: QualityProfile::new(500, 500.0, 2),
            medium: QualityProfile::new(1000, 1000.0, 3),
            high: QualityProfile::new(2000, 2000.0, 4),
        }
    }
}

impl QualityProfiles {
    pub fn profile(&self, tier: QualityTier) -> QualityProfile {
        match tier {
            QualityTier::Low => self.low,
            QualityTier::Medium => self.medium,
            QualityTier::High => self.high,
        }
    }
}

/// Cap the building list at the profile's entity cap. Ingestion order is
/// kept as-is; there is no nearest or largest prioritization.
pub fn truncate_to_profile(buildings: &mut Vec<Building>, profile: &QualityProfile) {
    buildings.truncate(profile.max_buildings);
}

//! # Scene Aggregation
//!
//! Groups and filters entities for the render collaborators: buildings are
//! batched by kind for grouped rendering, streets pass a quality-dependent
//! filter, and named major streets get label anchors.
//!
//! The medium-tier residential subsample is seeded and computed once per
//! ingestion, so the kept set cannot change between render passes.
//!
//! ## Table of Contents
//! 1. Building batches
//! 2. Street filtering
//! 3. Street labels

use std::collections::{BTreeMap, HashSet};

use bevy::math::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::coords::{project, GeoOrigin};
use crate::model::{Building, Street, StreetClass};
use crate::quality::QualityTier;

// ============================================================================
// 1. Building batches
// ============================================================================

/// Group buildings by resolved kind, in sorted kind order. Purely
/// organizational: no filtering happens here, and every building appears in
/// exactly one batch.
pub fn batch_by_kind(buildings: &[Building]) -> BTreeMap<&str, Vec<&Building>> {
    let mut batches: BTreeMap<&str, Vec<&Building>> = BTreeMap::new();
    for building in buildings {
        batches.entry(building.kind.as_str()).or_default().push(building);
    }
    batches
}

// ============================================================================
// 2. Street filtering
// ============================================================================

/// Pick the residential street ids kept at medium quality: a 50% Bernoulli
/// draw per street from a generator seeded with the ingestion sequence, so
/// the kept set is fixed for the lifetime of the collection.
pub fn residential_subsample(streets: &[Street], seed: u64) -> HashSet<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    streets
        .iter()
        .filter(|s| s.class == StreetClass::Residential)
        .filter(|_| rng.gen_bool(0.5))
        .map(|s| s.id.clone())
        .collect()
}

/// Streets that survive the active tier's policy:
/// low keeps only the major classes, medium keeps everything non-residential
/// plus the ingestion's residential subsample, high keeps all.
pub fn visible_streets<'a>(
    streets: &'a [Street],
    tier: QualityTier,
    residential_keep: &HashSet<String>,
) -> Vec<&'a Street> {
    streets
        .iter()
        .filter(|street| match tier {
            QualityTier::Low => street.class.is_major(),
            QualityTier::Medium => {
                street.class != StreetClass::Residential || residential_keep.contains(&street.id)
            }
            QualityTier::High => true,
        })
        .collect()
}

// ============================================================================
// 3. Street labels
// ============================================================================

/// Height above the ground plane at which labels are anchored
const LABEL_HEIGHT: f32 = 10.0;

/// A name label anchored over a street's midpoint
#[derive(Debug, Clone, PartialEq)]
pub struct StreetLabel {
    pub street_id: String,
    pub text: String,
    pub position: Vec3,
}

/// Labels for named primary/secondary streets; suppressed entirely at low
/// quality. The anchor is the projected midpoint node of the centerline.
pub fn street_labels(streets: &[Street], tier: QualityTier, origin: &GeoOrigin) -> Vec<StreetLabel> {
    if tier == QualityTier::Low {
        return Vec::new();
    }
    streets
        .iter()
        .filter(|street| street.class.is_major())
        .filter_map(|street| {
            let name = street.name.as_deref().filter(|n| !n.is_empty())?;
            let midpoint = street.points[street.points.len() / 2];
            let ground = project(midpoint, origin);
            Some(StreetLabel {
                street_id: street.id.clone(),
                text: name.to_string(),
                position: Vec3::new(ground.x, LABEL_HEIGHT, ground.y),
            })
        })
        .collect()
}

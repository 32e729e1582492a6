//! # Viewer Resources
//!
//! ECS state owned by the plugin. The entity collections live in one
//! resource and are only ever replaced wholesale; the generation counter is
//! what the render reconciliation keys off.
//!
//! ## Table of Contents
//! 1. CityScene — the logical entity collections
//! 2. View state — district, quality, mode, map view
//! 3. Selection

use std::collections::HashSet;

use bevy::prelude::*;

use urbe_common::{
    Building, District, DistrictCatalog, GeoOrigin, GeoPoint, QualityTier, Selection, Street,
};

// ============================================================================
// 1. CityScene — the logical entity collections
// ============================================================================

/// The logical dataset: everything the last applied ingestion produced plus
/// any hand-placed buildings. Replaced wholesale by ingestion; membership
/// edits (create/delete) bump the generation like a replacement does.
#[derive(Resource, Debug, Default)]
pub struct CityScene {
    pub buildings: Vec<Building>,
    pub streets: Vec<Street>,
    /// Residential street ids kept by this ingestion's seeded subsample
    pub residential_keep: HashSet<String>,
    /// Bumped on every membership change; reconciliation keys off it
    pub generation: u64,
}

impl CityScene {
    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn contains_building(&self, id: &str) -> bool {
        self.buildings.iter().any(|b| b.id == id)
    }
}

// ============================================================================
// 2. View state — district, quality, mode, map view
// ============================================================================

/// The district catalog available to the sidebar collaborator
#[derive(Resource, Debug, Default)]
pub struct Districts(pub DistrictCatalog);

/// The district whose bounds scope the current collections
#[derive(Resource, Debug, Clone)]
pub struct ActiveDistrict(pub District);

/// The active quality tier
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveQuality(pub QualityTier);

/// 2D tile map vs 3D scene. Camera distances are only tracked in 3D.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Map2d,
    ThreeD,
}

/// Center/zoom consumed by the 2D map collaborator
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// Street layer visibility toggle
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowStreets(pub bool);

/// Last cursor coordinate reported by the 2D map, for the coordinate readout
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorCoordinates(pub Option<GeoPoint>);

/// Whether the next map click places a hand-created building
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreateMode(pub bool);

/// Origin of the shared local planar frame
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionOrigin(pub GeoOrigin);

// ============================================================================
// 3. Selection
// ============================================================================

/// The selected building, one mutation path for every consumer
#[derive(Resource, Debug, Default)]
pub struct SelectedBuilding(pub Selection);

//! # District Catalog
//!
//! Static registry of named Santiago districts. Selecting a district scopes
//! the Overpass query to its bounding box and recenters the map view.
//!
//! ## Table of Contents
//! 1. District — a named region
//! 2. DistrictCatalog — static registry

use serde::{Deserialize, Serialize};

use crate::coords::{GeoBounds, GeoPoint};

/// Map zoom applied when a district is selected
pub const DISTRICT_ZOOM: u8 = 15;

// ============================================================================
// 1. District — a named region
// ============================================================================

/// A named geographic region with a bounding box and a view center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub bounds: GeoBounds,
    pub center: GeoPoint,
}

impl District {
    fn new(id: &str, name: &str, bounds: GeoBounds, center: GeoPoint) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            bounds,
            center,
        }
    }
}

// ============================================================================
// 2. DistrictCatalog — static registry
// ============================================================================

/// Registry of the districts available for ingestion
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictCatalog {
    districts: Vec<District>,
}

impl Default for DistrictCatalog {
    fn default() -> Self {
        Self {
            districts: santiago_districts(),
        }
    }
}

impl DistrictCatalog {
    pub fn all(&self) -> &[District] {
        &self.districts
    }

    pub fn get(&self, id: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    /// The district loaded at startup when no other is configured
    pub fn default_district(&self) -> &District {
        &self.districts[0]
    }
}

fn santiago_districts() -> Vec<District> {
    vec![
        District::new(
            "santiago-centro",
            "Santiago Centro",
            GeoBounds::new(-33.455, -70.675, -33.425, -70.64),
            GeoPoint::new(-33.44, -70.65),
        ),
        District::new(
            "providencia",
            "Providencia",
            GeoBounds::new(-33.435, -70.635, -33.415, -70.605),
            GeoPoint::new(-33.425, -70.62),
        ),
        District::new(
            "las-condes",
            "Las Condes",
            GeoBounds::new(-33.42, -70.59, -33.38, -70.55),
            GeoPoint::new(-33.4, -70.57),
        ),
        District::new(
            "vitacura",
            "Vitacura",
            GeoBounds::new(-33.405, -70.6, -33.375, -70.56),
            GeoPoint::new(-33.39, -70.58),
        ),
        District::new(
            "nunoa",
            "Ñuñoa",
            GeoBounds::new(-33.47, -70.63, -33.44, -70.59),
            GeoPoint::new(-33.455, -70.61),
        ),
    ]
}

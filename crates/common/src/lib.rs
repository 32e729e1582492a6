//! # Urbe Common — Shared Geographic Model
//!
//! The data core of the Urbe city viewer: geographic-to-planar projection,
//! the district catalog, the building/street entity model, quality-tier
//! budgets, LOD classification, scene aggregation, selection state, and the
//! JSON export format. Everything here is deterministic; ingestion and ECS
//! wiring live in `urbe-osm` and `urbe-viewer`.
//!
//! ## Modules
//! - `coords` — WGS84 → local planar projection (single shared implementation)
//! - `districts` — static catalog of the Santiago districts
//! - `model` — Building/Street entities and their color/footprint rules
//! - `quality` — named render-cost tiers
//! - `lod` — camera-distance → detail-level classification
//! - `scene` — batching, street filtering, labels
//! - `selection` — single-owner selected-entity state
//! - `export` — building collection JSON export/import

pub mod coords;
pub mod districts;
pub mod export;
pub mod lod;
pub mod model;
pub mod quality;
pub mod scene;
pub mod selection;

pub use coords::{ground_distance, project, GeoBounds, GeoOrigin, GeoPoint};
pub use districts::{District, DistrictCatalog, DISTRICT_ZOOM};
pub use lod::{classify, classify_building, DetailLevel};
pub use model::{Building, BuildingOrigin, Street, StreetClass};
pub use quality::{QualityProfile, QualityProfiles, QualityTier};
pub use selection::Selection;

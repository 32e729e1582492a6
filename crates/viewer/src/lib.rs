//! # Urbe Viewer — ECS Wiring
//!
//! Bevy plugin connecting the Urbe core to its collaborators. The 2D map,
//! the 3D renderer, and the editor UI are separate plugins that read the
//! resources and exchange the messages declared here; none of them touch
//! the entity collections directly.
//!
//! ## Modules
//! - `config` — `urbe.toml` parsing with in-code defaults
//! - `resources` — entity collections, view state, selection
//! - `messages` — the collaborator message surface
//! - `ingest` — background Overpass fetches with stale-completion discard
//! - `camera` — movement-end distance recomputation (3D mode only)
//! - `reconcile` — id → render-handle mapping, diffed per scene generation
//! - `editor` — create/delete/transform/selection message handling
//! - `plugin` — registration and startup ingestion

pub mod camera;
pub mod config;
pub mod editor;
pub mod ingest;
pub mod messages;
pub mod plugin;
pub mod reconcile;
pub mod resources;

pub use config::{ConfigError, ViewerConfig};
pub use messages::{
    CameraMoveEnded, DeleteBuilding, DeselectBuilding, MapClicked, MapCursorMoved, SceneReplaced,
    SelectBuilding, SelectDistrict, SetCreateMode, SetQuality, SetViewMode, ToggleStreets,
    TransformUpdate, UserNotice,
};
pub use plugin::CityPlugin;
pub use reconcile::{
    BuildingDims, BuildingMarker, RenderColor, RenderDetail, RenderHandles, SceneLabels,
    StreetMarker, StreetPath,
};
pub use resources::{
    ActiveDistrict, ActiveQuality, CityScene, CreateMode, CursorCoordinates, Districts, MapView,
    ProjectionOrigin, SelectedBuilding, ShowStreets, ViewMode,
};

//! # Collaborator Messages
//!
//! The message surface between the core and its collaborators. Inbound
//! messages come from the sidebar, the 2D map, and the 3D editor; outbound
//! messages tell them what changed.

use bevy::prelude::*;

use urbe_common::{GeoPoint, QualityTier};

use crate::resources::ViewMode;

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// Sidebar: select a district by catalog id
#[derive(Message, Debug, Clone)]
pub struct SelectDistrict {
    pub district_id: String,
}

/// Sidebar: switch the quality tier (triggers a full re-ingestion)
#[derive(Message, Debug, Clone, Copy)]
pub struct SetQuality {
    pub tier: QualityTier,
}

/// Switch between the 2D map and the 3D scene
#[derive(Message, Debug, Clone, Copy)]
pub struct SetViewMode {
    pub mode: ViewMode,
}

/// Toggle the street layer
#[derive(Message, Debug, Clone, Copy)]
pub struct ToggleStreets;

/// 3D camera collaborator: an interaction gesture ended at this position
#[derive(Message, Debug, Clone, Copy)]
pub struct CameraMoveEnded {
    pub position: Vec3,
}

/// Map or 3D scene: a building was clicked
#[derive(Message, Debug, Clone)]
pub struct SelectBuilding {
    pub id: String,
}

/// Clear the selection
#[derive(Message, Debug, Clone, Copy)]
pub struct DeselectBuilding;

/// 2D map: the cursor moved over this geographic coordinate
#[derive(Message, Debug, Clone, Copy)]
pub struct MapCursorMoved {
    pub coordinate: GeoPoint,
}

/// 2D map: empty ground was clicked. Places a building when create mode is
/// armed, otherwise ignored.
#[derive(Message, Debug, Clone, Copy)]
pub struct MapClicked {
    pub coordinate: GeoPoint,
}

/// Editor UI: arm or disarm the place-a-building mode
#[derive(Message, Debug, Clone, Copy)]
pub struct SetCreateMode {
    pub armed: bool,
}

/// Editor: remove a hand-created building (ingested ones are immutable here)
#[derive(Message, Debug, Clone)]
pub struct DeleteBuilding {
    pub id: String,
}

/// Transform gizmo result; applies to hand-created buildings only
#[derive(Message, Debug, Clone)]
pub struct TransformUpdate {
    pub id: String,
    pub position: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// One blocking user-facing notification (ingestion failures)
#[derive(Message, Debug, Clone)]
pub struct UserNotice {
    pub text: String,
}

/// The collections were replaced; collaborators holding derived state
/// (markers, meshes, info panels) should refresh
#[derive(Message, Debug, Clone, Copy)]
pub struct SceneReplaced {
    pub generation: u64,
}

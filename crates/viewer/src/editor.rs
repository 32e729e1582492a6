//! # Map & Editor Collaborator Messages
//!
//! Click/move events from the 2D map and create/delete/transform messages
//! from the editor UI. Hand-created buildings are fully mutable; ingested
//! ones only ever change through re-ingestion, so transform and delete
//! requests against them are refused.
//!
//! ## Table of Contents
//! 1. Map events — cursor tracking, click-to-place
//! 2. Building mutation — delete, transform
//! 3. Selection + toggles

use bevy::math::EulerRot;
use bevy::prelude::*;
use tracing::{info, warn};

use urbe_common::Building;

use crate::messages::{
    DeleteBuilding, DeselectBuilding, MapClicked, MapCursorMoved, SelectBuilding, SetCreateMode,
    ToggleStreets, TransformUpdate,
};
use crate::reconcile::RenderHandles;
use crate::resources::{
    CityScene, CreateMode, CursorCoordinates, ProjectionOrigin, SelectedBuilding, ShowStreets,
};

// ============================================================================
// 1. Map events — cursor tracking, click-to-place
// ============================================================================

/// System: track the cursor coordinate the map reports
pub fn handle_cursor_moved(
    mut messages: MessageReader<MapCursorMoved>,
    mut cursor: ResMut<CursorCoordinates>,
) {
    if let Some(message) = messages.read().last() {
        cursor.0 = Some(message.coordinate);
    }
}

/// System: arm/disarm the place-a-building mode
pub fn handle_set_create_mode(
    mut messages: MessageReader<SetCreateMode>,
    mut create_mode: ResMut<CreateMode>,
) {
    for message in messages.read() {
        create_mode.0 = message.armed;
    }
}

/// System: a map click places a hand-created building when create mode is
/// armed (and disarms it), mirroring the click-to-place flow of the editor.
/// Clicks with create mode off are the map's own business (selection goes
/// through `SelectBuilding`).
pub fn handle_map_click(
    mut messages: MessageReader<MapClicked>,
    origin: Res<ProjectionOrigin>,
    mut create_mode: ResMut<CreateMode>,
    mut scene: ResMut<CityScene>,
    mut selection: ResMut<SelectedBuilding>,
) {
    for message in messages.read() {
        if !create_mode.0 {
            continue;
        }
        create_mode.0 = false;

        let name = format!("Building {}", scene.buildings.len() + 1);
        let mut building = Building::user_created(name, message.coordinate);
        building.position = building.local_position(&origin.0);

        info!(
            "Created building '{}' at ({:.6}, {:.6})",
            building.name, message.coordinate.lat, message.coordinate.lng
        );
        selection.0.select(building.id.clone());
        scene.buildings.push(building);
        scene.generation += 1;
    }
}

// ============================================================================
// 2. Building mutation — delete, transform
// ============================================================================

/// System: remove a hand-created building
pub fn handle_delete_building(
    mut messages: MessageReader<DeleteBuilding>,
    mut scene: ResMut<CityScene>,
    mut selection: ResMut<SelectedBuilding>,
) {
    for message in messages.read() {
        match scene.building(&message.id) {
            Some(building) if building.is_user_created() => {
                scene.buildings.retain(|b| b.id != message.id);
                scene.generation += 1;
                selection.0.prune(|id| id != message.id);
            }
            Some(_) => {
                warn!("Refusing to delete ingested building '{}'", message.id);
            }
            None => {}
        }
    }
}

/// System: apply a transform-gizmo result. Only hand-created buildings
/// accept transforms; the spawned render handle is kept in sync.
pub fn handle_transform_update(
    mut messages: MessageReader<TransformUpdate>,
    handles: Res<RenderHandles>,
    mut scene: ResMut<CityScene>,
    mut transforms: Query<&mut Transform>,
) {
    for message in messages.read() {
        let Some(building) = scene.buildings.iter_mut().find(|b| b.id == message.id) else {
            continue;
        };
        if !building.is_user_created() {
            warn!("Ignoring transform for ingested building '{}'", message.id);
            continue;
        }

        building.position = message.position;
        building.rotation = message.rotation;
        building.scale = message.scale;

        if let Some(&entity) = handles.buildings.get(&message.id) {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation = message.position;
                transform.rotation = Quat::from_euler(
                    EulerRot::XYZ,
                    message.rotation.x,
                    message.rotation.y,
                    message.rotation.z,
                );
                transform.scale = message.scale;
            }
        }
    }
}

// ============================================================================
// 3. Selection + toggles
// ============================================================================

/// System: route selection messages through the single mutation path
pub fn handle_selection(
    mut selects: MessageReader<SelectBuilding>,
    mut deselects: MessageReader<DeselectBuilding>,
    scene: Res<CityScene>,
    mut selection: ResMut<SelectedBuilding>,
) {
    for message in selects.read() {
        if scene.contains_building(&message.id) {
            selection.0.select(message.id.clone());
        } else {
            warn!("Ignoring selection of unknown building '{}'", message.id);
        }
    }
    if deselects.read().next().is_some() {
        selection.0.deselect();
    }
}

/// System: toggle the street layer
pub fn handle_toggle_streets(
    mut messages: MessageReader<ToggleStreets>,
    mut show_streets: ResMut<ShowStreets>,
) {
    for _ in messages.read() {
        show_streets.0 = !show_streets.0;
    }
}

//! # Camera Distance Tracking
//!
//! Per-building camera distances drive the LOD classifier. They are
//! recomputed only when an interaction gesture ends and only in 3D mode;
//! the 2D map never consults them, so values left over from a previous 3D
//! session are harmless.

use bevy::prelude::*;
use tracing::info;

use urbe_common::{ground_distance, project};

use crate::messages::{SetViewMode, CameraMoveEnded};
use crate::resources::{CityScene, ProjectionOrigin, ViewMode};

/// System: switch between the 2D map and the 3D scene
pub fn handle_view_mode(mut messages: MessageReader<SetViewMode>, mut mode: ResMut<ViewMode>) {
    for message in messages.read() {
        if *mode != message.mode {
            info!("View mode: {:?}", message.mode);
            *mode = message.mode;
        }
    }
}

/// System: recompute building distances when a camera gesture ends.
///
/// Only the final position of a burst of gestures matters; intermediate
/// positions may be skipped without correctness impact since the distance
/// only selects a cosmetic detail tier.
pub fn update_camera_distances(
    mut messages: MessageReader<CameraMoveEnded>,
    mode: Res<ViewMode>,
    origin: Res<ProjectionOrigin>,
    mut scene: ResMut<CityScene>,
) {
    let Some(end) = messages.read().last() else {
        return;
    };
    if *mode != ViewMode::ThreeD {
        return;
    }

    for building in &mut scene.buildings {
        let ground = project(building.coordinates, &origin.0);
        let position = Vec3::new(ground.x, 0.0, ground.y);
        building.distance = Some(ground_distance(end.position, position));
    }
}

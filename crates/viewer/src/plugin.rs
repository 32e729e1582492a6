//! # City Plugin
//!
//! Registers every resource, message, and system the core needs and kicks
//! off the initial ingestion of the configured district. Collaborator
//! plugins (2D map, 3D renderer, editor UI) are added alongside this one
//! and talk to the core exclusively through its resources and messages.

use bevy::prelude::*;
use tracing::warn;

use urbe_common::{DistrictCatalog, GeoOrigin, DISTRICT_ZOOM};

use crate::camera::{handle_view_mode, update_camera_distances};
use crate::config::ViewerConfig;
use crate::editor::{
    handle_cursor_moved, handle_delete_building, handle_map_click, handle_selection,
    handle_set_create_mode, handle_toggle_streets, handle_transform_update,
};
use crate::ingest::{
    drain_ingest_results, handle_district_select, handle_quality_change, IngestChannel,
    IngestState,
};
use crate::messages::{
    CameraMoveEnded, DeleteBuilding, DeselectBuilding, MapClicked, MapCursorMoved, SceneReplaced,
    SelectBuilding, SelectDistrict, SetCreateMode, SetQuality, SetViewMode, ToggleStreets,
    TransformUpdate, UserNotice,
};
use crate::reconcile::{
    reconcile_render_handles, refresh_render_detail, refresh_street_labels, RenderHandles,
    SceneLabels,
};
use crate::resources::{
    ActiveDistrict, ActiveQuality, CityScene, CreateMode, CursorCoordinates, Districts, MapView,
    ProjectionOrigin, SelectedBuilding, ShowStreets, ViewMode,
};

/// Main plugin for the Urbe core
pub struct CityPlugin {
    pub config: ViewerConfig,
}

impl Default for CityPlugin {
    fn default() -> Self {
        Self {
            config: ViewerConfig::default(),
        }
    }
}

impl CityPlugin {
    pub fn with_config(config: ViewerConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CityPlugin {
    fn build(&self, app: &mut App) {
        let catalog = DistrictCatalog::default();
        let district = catalog
            .get(&self.config.default_district)
            .unwrap_or_else(|| {
                warn!(
                    "Configured district '{}' not in catalog, using default",
                    self.config.default_district
                );
                catalog.default_district()
            })
            .clone();

        app.insert_resource(self.config.clone())
            .insert_resource(ActiveQuality(self.config.default_quality))
            .insert_resource(ShowStreets(self.config.show_streets))
            .insert_resource(MapView {
                center: district.center,
                zoom: DISTRICT_ZOOM,
            })
            .insert_resource(ProjectionOrigin(GeoOrigin::default()))
            .insert_resource(ActiveDistrict(district))
            .insert_resource(Districts(catalog))
            .init_resource::<CityScene>()
            .init_resource::<SelectedBuilding>()
            .init_resource::<ViewMode>()
            .init_resource::<IngestChannel>()
            .init_resource::<IngestState>()
            .init_resource::<RenderHandles>()
            .init_resource::<SceneLabels>()
            .init_resource::<CursorCoordinates>()
            .init_resource::<CreateMode>()
            .add_message::<SelectDistrict>()
            .add_message::<SetQuality>()
            .add_message::<SetViewMode>()
            .add_message::<ToggleStreets>()
            .add_message::<CameraMoveEnded>()
            .add_message::<SelectBuilding>()
            .add_message::<DeselectBuilding>()
            .add_message::<MapCursorMoved>()
            .add_message::<MapClicked>()
            .add_message::<SetCreateMode>()
            .add_message::<DeleteBuilding>()
            .add_message::<TransformUpdate>()
            .add_message::<UserNotice>()
            .add_message::<SceneReplaced>()
            .add_systems(Startup, load_initial_district)
            .add_systems(
                Update,
                (
                    handle_district_select,
                    handle_quality_change,
                    drain_ingest_results,
                    handle_view_mode,
                    handle_toggle_streets,
                    handle_cursor_moved,
                    handle_set_create_mode,
                    handle_map_click,
                    handle_selection,
                    handle_delete_building,
                    handle_transform_update,
                    update_camera_distances,
                    refresh_street_labels,
                    refresh_render_detail,
                    reconcile_render_handles,
                )
                    .chain(),
            );
    }
}

/// Startup system: ingest the configured district exactly like a user
/// selection would
fn load_initial_district(
    active: Res<ActiveDistrict>,
    mut messages: MessageWriter<SelectDistrict>,
) {
    messages.write(SelectDistrict {
        district_id: active.0.id.clone(),
    });
}

//! # Render Handle Reconciliation
//!
//! The render collaborators attach meshes and markers to entities this
//! module owns. Instead of mutating handles ad hoc, an explicit owned
//! mapping (entity id → `Entity`) is reconciled against the current
//! collections: stale ids despawn, missing ids spawn, surviving ids get
//! their components re-inserted. Street visibility follows the aggregation
//! policy, so a quality change or layer toggle reconciles too.
//!
//! ## Table of Contents
//! 1. Render components
//! 2. RenderHandles — the owned mapping
//! 3. Reconciliation systems

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use tracing::debug;

use urbe_common::scene::{street_labels, visible_streets, StreetLabel};
use urbe_common::{classify_building, project, Building, DetailLevel, Street};

use crate::config::ViewerConfig;
use crate::resources::{ActiveQuality, CityScene, ProjectionOrigin, ShowStreets};

// ============================================================================
// 1. Render components
// ============================================================================

/// Marks a building render handle
#[derive(Component, Debug, Clone)]
pub struct BuildingMarker {
    pub id: String,
}

/// Marks a street render handle
#[derive(Component, Debug, Clone)]
pub struct StreetMarker {
    pub id: String,
}

/// Box dimensions for the mesh collaborator
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BuildingDims {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// CSS color consumed by both display collaborators
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RenderColor(pub String);

/// Street centerline in local coordinates, on the ground plane
#[derive(Component, Debug, Clone, PartialEq)]
pub struct StreetPath {
    pub points: Vec<Vec3>,
    pub width: f32,
}

/// Detail tier chosen by the LOD policy; `None` means the entity is beyond
/// the culling radius and must not be rendered at all
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RenderDetail(pub Option<DetailLevel>);

// ============================================================================
// 2. RenderHandles — the owned mapping
// ============================================================================

/// Owned mapping from entity id to spawned render handle
#[derive(Resource, Debug, Default)]
pub struct RenderHandles {
    pub buildings: HashMap<String, Entity>,
    pub streets: HashMap<String, Entity>,
    /// Scene generation the mapping was last reconciled against
    pub generation: u64,
}

/// Street name labels for the text collaborator, derived from the current
/// collections and the active tier (empty at low quality)
#[derive(Resource, Debug, Default)]
pub struct SceneLabels(pub Vec<StreetLabel>);

// ============================================================================
// 3. Reconciliation systems
// ============================================================================

fn building_bundle(
    building: &Building,
    origin: &ProjectionOrigin,
    max_distance: f32,
) -> (Transform, BuildingDims, RenderColor, RenderDetail) {
    (
        Transform::from_translation(building.local_position(&origin.0)),
        BuildingDims {
            width: building.width,
            height: building.height,
            depth: building.depth,
        },
        RenderColor(building.color.clone()),
        RenderDetail(classify_building(building, max_distance)),
    )
}

fn street_bundle(street: &Street, origin: &ProjectionOrigin) -> (StreetPath, RenderColor) {
    let points = street
        .points
        .iter()
        .map(|point| {
            let ground = project(*point, &origin.0);
            Vec3::new(ground.x, 0.0, ground.y)
        })
        .collect();
    (
        StreetPath {
            points,
            width: street.width,
        },
        RenderColor(street.color.clone()),
    )
}

/// System: diff the owned mapping against the current collections.
/// Runs when the scene membership, the quality tier, or the street toggle
/// changed; otherwise it is a no-op.
pub fn reconcile_render_handles(
    mut commands: Commands,
    scene: Res<CityScene>,
    quality: Res<ActiveQuality>,
    config: Res<ViewerConfig>,
    origin: Res<ProjectionOrigin>,
    show_streets: Res<ShowStreets>,
    mut handles: ResMut<RenderHandles>,
) {
    let membership_changed = handles.generation != scene.generation;
    if !membership_changed && !quality.is_changed() && !show_streets.is_changed() {
        return;
    }

    let profile = config.quality.profile(quality.0);

    // Buildings: every logical entity gets a handle; culling is expressed
    // through RenderDetail, never through despawning.
    let desired_buildings: HashSet<&str> = scene.buildings.iter().map(|b| b.id.as_str()).collect();
    let stale: Vec<String> = handles
        .buildings
        .keys()
        .filter(|id| !desired_buildings.contains(id.as_str()))
        .cloned()
        .collect();
    for id in stale {
        if let Some(entity) = handles.buildings.remove(&id) {
            commands.entity(entity).despawn();
        }
    }
    for building in &scene.buildings {
        let bundle = building_bundle(building, &origin, profile.max_distance);
        match handles.buildings.get(&building.id) {
            Some(&entity) => {
                commands.entity(entity).insert(bundle);
            }
            None => {
                let entity = commands
                    .spawn((
                        BuildingMarker {
                            id: building.id.clone(),
                        },
                        bundle,
                    ))
                    .id();
                handles.buildings.insert(building.id.clone(), entity);
            }
        }
    }

    // Streets: the aggregation policy decides which ids exist at all
    let desired_streets: Vec<&Street> = if show_streets.0 {
        visible_streets(&scene.streets, quality.0, &scene.residential_keep)
    } else {
        Vec::new()
    };
    let desired_ids: HashSet<&str> = desired_streets.iter().map(|s| s.id.as_str()).collect();
    let stale: Vec<String> = handles
        .streets
        .keys()
        .filter(|id| !desired_ids.contains(id.as_str()))
        .cloned()
        .collect();
    for id in stale {
        if let Some(entity) = handles.streets.remove(&id) {
            commands.entity(entity).despawn();
        }
    }
    for street in desired_streets {
        let bundle = street_bundle(street, &origin);
        match handles.streets.get(&street.id) {
            Some(&entity) => {
                commands.entity(entity).insert(bundle);
            }
            None => {
                let entity = commands
                    .spawn((
                        StreetMarker {
                            id: street.id.clone(),
                        },
                        Transform::IDENTITY,
                        bundle,
                    ))
                    .id();
                handles.streets.insert(street.id.clone(), entity);
            }
        }
    }

    handles.generation = scene.generation;
    debug!(
        "Reconciled render handles: {} buildings, {} streets",
        handles.buildings.len(),
        handles.streets.len()
    );
}

/// System: rebuild the street label set when the collections or the tier
/// change
pub fn refresh_street_labels(
    scene: Res<CityScene>,
    quality: Res<ActiveQuality>,
    origin: Res<ProjectionOrigin>,
    mut labels: ResMut<SceneLabels>,
) {
    if !scene.is_changed() && !quality.is_changed() {
        return;
    }
    labels.0 = street_labels(&scene.streets, quality.0, &origin.0);
}

/// System: refresh detail tiers after a distance recompute. Cheaper than a
/// full reconcile — only the `RenderDetail` component moves.
pub fn refresh_render_detail(
    scene: Res<CityScene>,
    quality: Res<ActiveQuality>,
    config: Res<ViewerConfig>,
    mut query: Query<(&BuildingMarker, &mut RenderDetail)>,
) {
    if !scene.is_changed() && !quality.is_changed() {
        return;
    }
    let profile = config.quality.profile(quality.0);
    let by_id: HashMap<&str, &Building> =
        scene.buildings.iter().map(|b| (b.id.as_str(), b)).collect();

    for (marker, mut detail) in query.iter_mut() {
        if let Some(building) = by_id.get(marker.id.as_str()) {
            let next = classify_building(building, profile.max_distance);
            if detail.0 != next {
                detail.0 = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbe_common::{GeoPoint, QualityTier};
    use urbe_osm::FeatureSet;

    use crate::ingest::apply_feature_set;

    fn unbounded() -> urbe_common::QualityProfile {
        urbe_common::QualityProfile {
            max_buildings: usize::MAX,
            max_distance: 1000.0,
            lod_levels: 3,
        }
    }

    fn building(way_id: i64) -> Building {
        Building::from_osm(
            way_id,
            None,
            GeoPoint::new(-33.44, -70.65),
            10.0,
            "office".to_string(),
            None,
        )
    }

    fn street(way_id: i64, highway: &str) -> Street {
        Street::from_osm(
            way_id,
            None,
            vec![GeoPoint::new(-33.44, -70.65), GeoPoint::new(-33.45, -70.66)],
            highway,
        )
    }

    fn test_app(tier: QualityTier) -> App {
        let mut app = App::new();
        app.insert_resource(ViewerConfig::default())
            .insert_resource(ActiveQuality(tier))
            .insert_resource(ShowStreets(true))
            .init_resource::<CityScene>()
            .init_resource::<ProjectionOrigin>()
            .init_resource::<RenderHandles>()
            .init_resource::<SceneLabels>()
            .add_systems(
                Update,
                (
                    refresh_street_labels,
                    refresh_render_detail,
                    reconcile_render_handles,
                ),
            );
        app
    }

    fn replace_scene(app: &mut App, set: FeatureSet, seq: u64) {
        let mut scene = app.world_mut().resource_mut::<CityScene>();
        apply_feature_set(&mut scene, set, &unbounded(), seq);
    }

    #[test]
    fn test_spawns_handles_for_new_scene() {
        let mut app = test_app(QualityTier::High);
        replace_scene(
            &mut app,
            FeatureSet {
                buildings: vec![building(1), building(2)],
                streets: vec![street(10, "primary")],
            },
            1,
        );
        app.update();

        let handles = app.world().resource::<RenderHandles>();
        assert_eq!(handles.buildings.len(), 2);
        assert_eq!(handles.streets.len(), 1);
        assert_eq!(handles.generation, 1);

        let mut query = app.world_mut().query::<&BuildingMarker>();
        assert_eq!(query.iter(app.world()).count(), 2);
    }

    #[test]
    fn test_replacement_despawns_stale_and_spawns_new() {
        let mut app = test_app(QualityTier::High);
        replace_scene(
            &mut app,
            FeatureSet {
                buildings: vec![building(1), building(2)],
                streets: Vec::new(),
            },
            1,
        );
        app.update();
        let first_entity = app.world().resource::<RenderHandles>().buildings["osm-1"];

        replace_scene(
            &mut app,
            FeatureSet {
                buildings: vec![building(1), building(3)],
                streets: Vec::new(),
            },
            2,
        );
        app.update();

        let handles = app.world().resource::<RenderHandles>();
        assert_eq!(handles.buildings.len(), 2);
        assert!(handles.buildings.contains_key("osm-1"));
        assert!(handles.buildings.contains_key("osm-3"));
        assert!(!handles.buildings.contains_key("osm-2"));
        // Surviving ids keep their entity (upsert, not respawn)
        assert_eq!(handles.buildings["osm-1"], first_entity);

        let mut query = app.world_mut().query::<&BuildingMarker>();
        assert_eq!(query.iter(app.world()).count(), 2, "stale handle not despawned");
    }

    #[test]
    fn test_street_handles_follow_quality_policy() {
        let mut app = test_app(QualityTier::Low);
        replace_scene(
            &mut app,
            FeatureSet {
                buildings: Vec::new(),
                streets: vec![
                    street(1, "primary"),
                    street(2, "secondary"),
                    street(3, "residential"),
                ],
            },
            1,
        );
        app.update();

        let handles = app.world().resource::<RenderHandles>();
        assert_eq!(handles.streets.len(), 2);
        assert!(handles.streets.contains_key("street-1"));
        assert!(handles.streets.contains_key("street-2"));
    }

    #[test]
    fn test_street_toggle_clears_handles() {
        let mut app = test_app(QualityTier::High);
        replace_scene(
            &mut app,
            FeatureSet {
                buildings: Vec::new(),
                streets: vec![street(1, "primary")],
            },
            1,
        );
        app.update();
        assert_eq!(app.world().resource::<RenderHandles>().streets.len(), 1);

        app.world_mut().resource_mut::<ShowStreets>().0 = false;
        app.update();

        assert!(app.world().resource::<RenderHandles>().streets.is_empty());
        let mut query = app.world_mut().query::<&StreetMarker>();
        assert_eq!(query.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_labels_follow_scene_and_tier() {
        let mut app = test_app(QualityTier::Medium);
        let mut named = street(1, "primary");
        named.name = Some("Avenida Apoquindo".to_string());
        replace_scene(
            &mut app,
            FeatureSet {
                buildings: Vec::new(),
                streets: vec![named, street(2, "residential")],
            },
            1,
        );
        app.update();

        let labels = app.world().resource::<SceneLabels>();
        assert_eq!(labels.0.len(), 1);
        assert_eq!(labels.0[0].text, "Avenida Apoquindo");

        // Dropping to low quality clears the label set
        app.world_mut().resource_mut::<ActiveQuality>().0 = QualityTier::Low;
        app.update();
        assert!(app.world().resource::<SceneLabels>().0.is_empty());
    }

    #[test]
    fn test_detail_refresh_tracks_distances() {
        let mut app = test_app(QualityTier::Medium); // max_distance 1000
        replace_scene(
            &mut app,
            FeatureSet {
                buildings: vec![building(1)],
                streets: Vec::new(),
            },
            1,
        );
        app.update();

        // No distance recorded yet: closest bucket
        let mut query = app.world_mut().query::<&RenderDetail>();
        assert_eq!(query.single(app.world()).unwrap().0, Some(DetailLevel::High));

        // Push the building out past the culling radius
        app.world_mut().resource_mut::<CityScene>().buildings[0].distance = Some(1500.0);
        app.update();
        let mut query = app.world_mut().query::<&RenderDetail>();
        assert_eq!(query.single(app.world()).unwrap().0, None);

        // And back into the low-detail band
        app.world_mut().resource_mut::<CityScene>().buildings[0].distance = Some(900.0);
        app.update();
        let mut query = app.world_mut().query::<&RenderDetail>();
        assert_eq!(query.single(app.world()).unwrap().0, Some(DetailLevel::Low));
    }
}

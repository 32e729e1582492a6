//! # Ingestion Pipeline
//!
//! District switches and quality changes dispatch a background Overpass
//! fetch; results come back over an mpsc channel and are applied on the main
//! thread. Every dispatch gets a monotonic sequence number and the drain
//! discards completions older than the newest dispatch, so overlapping
//! requests can never leave the collections inconsistent with the latest
//! user action.
//!
//! ## Table of Contents
//! 1. IngestChannel / IngestState — channel + sequencing resources
//! 2. Dispatch — worker thread with a current-thread runtime
//! 3. Apply — truncate, subsample, replace
//! 4. Systems

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::prelude::*;
use tracing::{debug, error, info, warn};

use urbe_common::quality::truncate_to_profile;
use urbe_common::scene::residential_subsample;
use urbe_common::{District, GeoBounds, QualityProfile, DISTRICT_ZOOM};
use urbe_osm::{FeatureSet, IngestError, OsmClient};

use crate::config::ViewerConfig;
use crate::messages::{SceneReplaced, SelectDistrict, SetQuality, UserNotice};
use crate::resources::{
    ActiveDistrict, ActiveQuality, CityScene, Districts, MapView, SelectedBuilding,
};

// ============================================================================
// 1. IngestChannel / IngestState — channel + sequencing resources
// ============================================================================

/// Result of one background fetch, tagged with its dispatch sequence
#[derive(Debug)]
pub struct IngestOutcome {
    pub seq: u64,
    pub district_id: String,
    pub result: Result<FeatureSet, IngestError>,
}

/// Channel carrying fetch results back from worker threads
#[derive(Resource)]
pub struct IngestChannel {
    pub sender: Arc<Mutex<Sender<IngestOutcome>>>,
    pub receiver: Arc<Mutex<Receiver<IngestOutcome>>>,
}

impl Default for IngestChannel {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender: Arc::new(Mutex::new(sender)),
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }
}

/// Sequencing and in-flight bookkeeping
#[derive(Resource, Debug, Default)]
pub struct IngestState {
    /// Sequence number of the most recently dispatched request
    pub newest_seq: u64,
    /// Whether a request newer than the applied scene is outstanding
    pub loading: bool,
}

// ============================================================================
// 2. Dispatch — worker thread with a current-thread runtime
// ============================================================================

/// Start a fetch for `district` on a worker thread. The sequence number is
/// claimed here, on the main thread, so dispatch order and sequence order
/// always agree.
pub fn dispatch_fetch(
    state: &mut IngestState,
    ingest: &IngestChannel,
    config: &ViewerConfig,
    district: &District,
) {
    state.newest_seq += 1;
    state.loading = true;

    let seq = state.newest_seq;
    let district_id = district.id.clone();
    let bounds = district.bounds;
    let endpoint = config.endpoint.clone();
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let sender = ingest.sender.clone();

    info!("Ingestion #{seq}: fetching '{district_id}'");
    std::thread::spawn(move || {
        let result = fetch_blocking(&endpoint, timeout, &bounds);
        if let Ok(sender) = sender.lock() {
            let _ = sender.send(IngestOutcome {
                seq,
                district_id,
                result,
            });
        }
    });
}

/// Run one fetch to completion on a dedicated current-thread runtime
fn fetch_blocking(
    endpoint: &str,
    timeout: Duration,
    bounds: &GeoBounds,
) -> Result<FeatureSet, IngestError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| IngestError::Network(e.to_string()))?;
    runtime.block_on(async {
        let client = OsmClient::new(endpoint, timeout)?;
        client.fetch(bounds).await
    })
}

// ============================================================================
// 3. Apply — truncate, subsample, replace
// ============================================================================

/// Apply a successful fetch: cap the buildings at the active budget (in
/// ingestion order), compute the one-time residential subsample for this
/// collection, and replace everything wholesale.
pub fn apply_feature_set(scene: &mut CityScene, mut set: FeatureSet, profile: &QualityProfile, seq: u64) {
    truncate_to_profile(&mut set.buildings, profile);
    scene.residential_keep = residential_subsample(&set.streets, seq);
    scene.buildings = set.buildings;
    scene.streets = set.streets;
    scene.generation += 1;
}

// ============================================================================
// 4. Systems
// ============================================================================

/// System: a district selection recenters the map and starts a fetch
pub fn handle_district_select(
    mut messages: MessageReader<SelectDistrict>,
    districts: Res<Districts>,
    config: Res<ViewerConfig>,
    ingest: Res<IngestChannel>,
    mut active: ResMut<ActiveDistrict>,
    mut map_view: ResMut<MapView>,
    mut state: ResMut<IngestState>,
) {
    for message in messages.read() {
        let Some(district) = districts.0.get(&message.district_id) else {
            warn!("Unknown district '{}'", message.district_id);
            continue;
        };
        active.0 = district.clone();
        map_view.center = district.center;
        map_view.zoom = DISTRICT_ZOOM;
        dispatch_fetch(&mut state, &ingest, &config, district);
    }
}

/// System: a quality change re-ingests the active district under the new
/// budget (a re-fetch, not a re-filter of cached data)
pub fn handle_quality_change(
    mut messages: MessageReader<SetQuality>,
    active: Res<ActiveDistrict>,
    config: Res<ViewerConfig>,
    ingest: Res<IngestChannel>,
    mut quality: ResMut<ActiveQuality>,
    mut state: ResMut<IngestState>,
) {
    for message in messages.read() {
        quality.0 = message.tier;
        dispatch_fetch(&mut state, &ingest, &config, &active.0);
    }
}

/// System: drain completed fetches. Only the newest dispatched request may
/// replace the collections; anything older is discarded. Failures emit one
/// notification and leave the prior collections untouched.
pub fn drain_ingest_results(
    ingest: Res<IngestChannel>,
    config: Res<ViewerConfig>,
    quality: Res<ActiveQuality>,
    mut state: ResMut<IngestState>,
    mut scene: ResMut<CityScene>,
    mut selection: ResMut<SelectedBuilding>,
    mut notices: MessageWriter<UserNotice>,
    mut replaced: MessageWriter<SceneReplaced>,
) {
    let outcomes: Vec<IngestOutcome> = match ingest.receiver.lock() {
        Ok(receiver) => receiver.try_iter().collect(),
        Err(_) => return,
    };

    for outcome in outcomes {
        if outcome.seq < state.newest_seq {
            debug!(
                "Discarding stale ingestion #{} (newest is #{})",
                outcome.seq, state.newest_seq
            );
            continue;
        }
        state.loading = false;

        match outcome.result {
            Ok(set) => {
                let profile = config.quality.profile(quality.0);
                info!(
                    "Ingestion #{}: applying {} buildings, {} streets for '{}'",
                    outcome.seq,
                    set.buildings.len().min(profile.max_buildings),
                    set.streets.len(),
                    outcome.district_id
                );
                apply_feature_set(&mut scene, set, &profile, outcome.seq);
                selection.0.prune(|id| scene.contains_building(id));
                replaced.write(SceneReplaced {
                    generation: scene.generation,
                });
            }
            Err(err) => {
                error!("Ingestion #{} failed: {err}", outcome.seq);
                notices.write(UserNotice {
                    text: format!("Failed to load data for {}: {err}", outcome.district_id),
                });
            }
        }
    }
}

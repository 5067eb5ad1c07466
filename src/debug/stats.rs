#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::core::events::{RoundOver, ShipHit, ShipSpawned};
#[cfg(feature = "debug")]
use crate::interaction::tap::ShipTapped;

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub time_accum: f32,
    pub frame_counter: u64,
}

/// Running counters since startup.
#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub taps: u64,
    pub hits: u64,
    pub spawns: u64,
    pub rounds_over: u64,
}

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    mut taps: EventReader<ShipTapped>,
    mut hits: EventReader<ShipHit>,
    mut spawns: EventReader<ShipSpawned>,
    mut over: EventReader<RoundOver>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.taps += taps.read().count() as u64;
    stats.hits += hits.read().count() as u64;
    stats.spawns += spawns.read().count() as u64;
    stats.rounds_over += over.read().count() as u64;
}

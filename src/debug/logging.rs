#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::stats::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{Ship, ShipFlight};
#[cfg(feature = "debug")]
use crate::core::config::GameConfig;
#[cfg(feature = "debug")]
use crate::core::round::RoundController;

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    controller: Res<RoundController>,
    flights: Query<&ShipFlight, With<Ship>>,
) {
    if cfg.stats_log_interval <= 0.0 {
        return;
    }
    state.time_accum += time.delta_secs();
    if state.time_accum < cfg.stats_log_interval {
        return;
    }
    state.time_accum = 0.0;
    let progress = flights.iter().next().map(|f| f.progress()).unwrap_or(0.0);
    info!(
        target: "stats",
        "ROUND frame={} t={:.1}s fps={:.1} ft_ms={:.1} score={} high={} run={} duration={:.3}s progress={:.2} game_over={} taps={} hits={} spawns={} rounds_over={}",
        state.frame_counter,
        time.elapsed_secs(),
        stats.fps,
        stats.frame_time_ms,
        controller.score(),
        controller.high_score(),
        controller.run(),
        controller.duration(),
        progress,
        controller.is_game_over(),
        stats.taps,
        stats.hits,
        stats.spawns,
        stats.rounds_over
    );
}

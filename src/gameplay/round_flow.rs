// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::state::AppState;
use crate::core::events::{
    ResetHighScoreRequested, RestartRequested, RoundOver, ShipHit, ShipReachedCamera,
    ShipSpawned,
};
use crate::core::round::RoundController;
use crate::core::system::system_order::{configure_round_sets, RoundLogicSet};
use crate::persistence::HighScoreStorage;

/// Randomness for spawn placement. Insert a seeded one before the plugin for
/// reproducible runs.
#[derive(Resource, Deref, DerefMut)]
pub struct RoundRng(pub StdRng);

impl RoundRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RoundRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Wires the round controller to events. Expects `GameConfig` and (optionally)
/// `HighScoreStorage` to be inserted before it is added.
pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<StatesPlugin>() {
            app.add_plugins(StatesPlugin);
        }
        configure_round_sets(app);
        app.init_state::<AppState>()
            .add_event::<ShipSpawned>()
            .add_event::<ShipHit>()
            .add_event::<ShipReachedCamera>()
            .add_event::<RoundOver>()
            .add_event::<RestartRequested>()
            .add_event::<ResetHighScoreRequested>()
            .init_resource::<RoundRng>()
            .init_resource::<RoundController>()
            .add_systems(Startup, start_first_round)
            .add_systems(
                Update,
                // Arrival wins a same-frame tie with a hit.
                (
                    handle_ship_timeouts,
                    handle_ship_hits,
                    handle_restart_requests,
                    handle_high_score_resets,
                )
                    .chain()
                    .in_set(RoundLogicSet),
            );
    }
}

fn start_first_round(
    mut controller: ResMut<RoundController>,
    mut rng: ResMut<RoundRng>,
    mut spawned: EventWriter<ShipSpawned>,
) {
    let spawn = controller.spawn(&mut rng.0);
    info!(
        target: "round",
        "Round started: ship at {:?}, approach {:.2}s",
        spawn.position, spawn.duration
    );
    spawned.write(ShipSpawned(spawn));
}

fn handle_ship_hits(
    mut hits: EventReader<ShipHit>,
    mut controller: ResMut<RoundController>,
    mut rng: ResMut<RoundRng>,
    mut spawned: EventWriter<ShipSpawned>,
) {
    for _ in hits.read() {
        match controller.on_hit(&mut rng.0) {
            Some(spawn) => {
                info!(target: "round", "Hit! score={}", controller.score());
                debug!(
                    target: "round",
                    "Respawn at {:?}, approach {:.3}s",
                    spawn.position, spawn.duration
                );
                spawned.write(ShipSpawned(spawn));
            }
            None => debug!(target: "round", "Hit ignored; round is over"),
        }
    }
}

fn handle_ship_timeouts(
    mut arrivals: EventReader<ShipReachedCamera>,
    mut controller: ResMut<RoundController>,
    mut storage: Option<ResMut<HighScoreStorage>>,
    mut round_over: EventWriter<RoundOver>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for _ in arrivals.read() {
        let Some(outcome) = controller.on_timeout() else {
            continue;
        };
        info!(
            target: "round",
            "GAME OVER score={} high_score={}{}",
            outcome.score,
            outcome.high_score,
            if outcome.new_record { " (new record)" } else { "" }
        );
        if outcome.new_record {
            match storage.as_deref_mut() {
                Some(s) => {
                    s.persist(outcome.high_score);
                }
                None => debug!(target: "storage", "No high score storage; record kept in memory"),
            }
        }
        round_over.write(RoundOver(outcome));
        next_state.set(AppState::GameOver);
    }
}

fn handle_restart_requests(
    mut requests: EventReader<RestartRequested>,
    mut controller: ResMut<RoundController>,
    mut rng: ResMut<RoundRng>,
    mut spawned: EventWriter<ShipSpawned>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    // Several clicks in one frame still mean one restart.
    if requests.read().count() == 0 {
        return;
    }
    let spawn = controller.restart(&mut rng.0);
    info!(
        target: "round",
        "Restart (run {}): ship at {:?}, approach {:.2}s",
        controller.run(),
        spawn.position,
        spawn.duration
    );
    spawned.write(ShipSpawned(spawn));
    next_state.set(AppState::Playing);
}

fn handle_high_score_resets(
    mut requests: EventReader<ResetHighScoreRequested>,
    mut controller: ResMut<RoundController>,
    storage: Option<ResMut<HighScoreStorage>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    controller.reset_high_score();
    info!(target: "round", "High score reset");
    if let Some(mut s) = storage {
        s.persist(0);
    }
}

// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Round state: score, flight duration, game-over flag and the high score.
//! Pure logic; the Bevy systems in `gameplay::round_flow` drive it from events.

use bevy::prelude::*;
use rand::Rng;

use crate::core::config::{GameConfig, RoundConfig};
use crate::persistence::HighScoreStorage;

/// Tuning knobs copied out of `RoundConfig` so hot reload can swap them live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundTuning {
    pub initial_duration: f32,
    pub decay: f32,
    pub spawn_range: u32,
    pub spawn_z: i32,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self::from(&RoundConfig::default())
    }
}

impl From<&RoundConfig> for RoundTuning {
    fn from(cfg: &RoundConfig) -> Self {
        Self {
            initial_duration: cfg.initial_duration,
            decay: cfg.decay,
            spawn_range: cfg.spawn_range,
            spawn_z: cfg.spawn_z,
        }
    }
}

/// Where the ship starts its approach, on the integer scene grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SpawnPosition {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Output of `spawn`: the next placement and how long the approach lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub position: SpawnPosition,
    pub duration: f32,
}

/// Result of a miss that actually ended the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct RoundController {
    score: u32,
    duration: f32,
    game_over: bool,
    high_score: u32,
    run: u32,
    tuning: RoundTuning,
}

impl FromWorld for RoundController {
    fn from_world(world: &mut World) -> Self {
        let tuning = world
            .get_resource::<GameConfig>()
            .map(|cfg| RoundTuning::from(&cfg.round))
            .unwrap_or_default();
        let high_score = world
            .get_resource::<HighScoreStorage>()
            .map(|storage| match storage.load() {
                Ok(v) => v,
                Err(e) => {
                    warn!(target: "storage", "High score unreadable, starting from 0: {e:#}");
                    0
                }
            })
            .unwrap_or(0);
        info!(target: "round", "Round controller ready (high score {high_score})");
        Self::new(tuning, high_score)
    }
}

impl RoundController {
    pub fn new(tuning: RoundTuning, high_score: u32) -> Self {
        Self {
            score: 0,
            duration: tuning.initial_duration,
            game_over: false,
            high_score,
            run: 0,
            tuning,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn duration(&self) -> f32 {
        self.duration
    }
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
    pub fn high_score(&self) -> u32 {
        self.high_score
    }
    pub fn run(&self) -> u32 {
        self.run
    }
    pub fn tuning(&self) -> RoundTuning {
        self.tuning
    }

    /// Replace tuning without touching score or the current duration.
    /// Takes effect on the next spawn / decay / restart.
    pub fn set_tuning(&mut self, tuning: RoundTuning) {
        self.tuning = tuning;
    }

    /// Pick a fresh position in `[-range, range]` on x and y at the fixed depth.
    /// Leaves score alone and clears the game-over flag.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Spawn {
        let r = i32::try_from(self.tuning.spawn_range).unwrap_or(i32::MAX);
        let position = SpawnPosition {
            x: rng.gen_range(-r..=r),
            y: rng.gen_range(-r..=r),
            z: self.tuning.spawn_z,
        };
        self.game_over = false;
        Spawn {
            position,
            duration: self.duration,
        }
    }

    /// Count a hit and schedule the next, faster approach.
    /// Returns `None` when the round is already over (tap is ignored).
    pub fn on_hit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Spawn> {
        if self.game_over {
            return None;
        }
        self.score += 1;
        self.duration *= self.tuning.decay;
        Some(self.spawn(rng))
    }

    /// Ship reached the camera untouched. `None` if the round had already ended.
    pub fn on_timeout(&mut self) -> Option<RoundOutcome> {
        if self.game_over {
            return None;
        }
        self.game_over = true;
        let new_record = self.set_high_score(self.score);
        Some(RoundOutcome {
            score: self.score,
            high_score: self.high_score,
            new_record,
        })
    }

    /// Raise the high score if `candidate` beats it. Returns true when it changed
    /// (caller persists).
    pub fn set_high_score(&mut self, candidate: u32) -> bool {
        if candidate > self.high_score {
            self.high_score = candidate;
            true
        } else {
            false
        }
    }

    pub fn reset_high_score(&mut self) {
        self.high_score = 0;
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Spawn {
        self.score = 0;
        self.duration = self.tuning.initial_duration;
        self.run += 1;
        self.spawn(rng)
    }
}

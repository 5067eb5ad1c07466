// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use serde::Deserialize;
use ron::value::Value;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
            title: "Flight Game".into(),
            auto_close: 0.0,
        }
    }
}

/// Difficulty curve + spawn volume.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds the first approach takes (and every approach after a restart).
    pub initial_duration: f32,
    /// Multiplier applied to the approach duration after every hit.
    pub decay: f32,
    /// Spawn x/y are drawn from `-spawn_range..=spawn_range`.
    pub spawn_range: u32,
    /// Fixed spawn depth; negative is away from the camera.
    pub spawn_z: i32,
}
impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            initial_duration: 10.0,
            decay: 0.9,
            spawn_range: 25,
            spawn_z: -90,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub camera_position: [f32; 3],
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub ambient_brightness: f32,
    /// Pick sphere radius around the ship origin.
    pub ship_radius: f32,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_position: [0.0, 0.0, 15.0],
            light_position: [0.0, 10.0, 10.0],
            light_intensity: 10_000_000.0,
            ambient_brightness: 300.0,
            ship_radius: 3.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HighlightConfig {
    pub duration: f32,
    pub color: [f32; 3],
}
impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            duration: 0.2,
            color: [1.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub key: String,
}
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "high_score.ron".into(),
            key: "highScore".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub round: RoundConfig,
    pub scene: SceneConfig,
    pub highlight: HighlightConfig,
    pub storage: StorageConfig,
    /// Seconds between periodic round stat lines (debug builds). 0 disables.
    pub stats_log_interval: f32,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            round: Default::default(),
            scene: Default::default(),
            highlight: Default::default(),
            storage: Default::default(),
            stats_log_interval: 5.0,
        }
    }
}

/// Deep-merge `overlay` into `base`: maps merge key by key, anything else replaces.
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Map(base), Value::Map(overlay)) => {
            for (k, v) in overlay.into_iter() {
                let found = base.iter_mut().find(|(ek, _)| **ek == k);
                match found {
                    Some((_, existing)) => merge_value(existing, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (b, o) => *b = o,
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Merge several RON files (later files override earlier keys) and deserialize once.
    /// Returns the config, the paths actually used, and per-file errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        if let Some(val) = merged {
            match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => (GameConfig::default(), used, {
                    let mut evec = errors;
                    evec.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    evec
                }),
            }
        } else {
            (GameConfig::default(), used, errors)
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.round.initial_duration <= 0.0 {
            w.push(format!(
                "round.initial_duration {} must be > 0; ships arrive instantly",
                self.round.initial_duration
            ));
        }
        if !(self.round.decay > 0.0 && self.round.decay <= 1.0) {
            w.push(format!(
                "round.decay {} outside (0, 1]; approach time no longer shrinks smoothly",
                self.round.decay
            ));
        }
        if self.round.spawn_range > 10_000 {
            w.push(format!(
                "round.spawn_range {} very large; ships spawn off screen",
                self.round.spawn_range
            ));
        }
        if self.round.spawn_z >= 0 {
            w.push(format!(
                "round.spawn_z {} is not in front of the camera target (expected < 0)",
                self.round.spawn_z
            ));
        }
        if self.scene.ship_radius <= 0.0 {
            w.push("scene.ship_radius must be > 0; taps can never hit".into());
        }
        if self.highlight.duration < 0.0 {
            w.push(format!(
                "highlight.duration {} negative -> treated as 0",
                self.highlight.duration
            ));
        }
        if self.storage.key.trim().is_empty() {
            w.push("storage.key is empty".into());
        }
        if self.storage.path.trim().is_empty() {
            w.push("storage.path is empty; high score cannot be saved".into());
        }
        if self.stats_log_interval < 0.0 {
            w.push("stats_log_interval negative -> treated as disabled".into());
        }
        w
    }
}

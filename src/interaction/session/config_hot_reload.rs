use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::GameConfig;
use crate::core::round::{RoundController, RoundTuning};

/// Files polled for changes, in layering order (later overrides earlier).
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

impl ConfigReloadSettings {
    /// Files to load right now: the base layer always, so a missing one is reported,
    /// and later layers only when they exist. All of `paths` is still polled.
    pub fn startup_paths(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .enumerate()
            .filter(|(i, p)| *i == 0 || p.exists())
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<ConfigReloadSettings>()
            .map(|s| s.interval_secs)
            .unwrap_or(0.5)
            .max(0.05);
        // Seed with current mtimes so startup doesn't count as a change.
        let mut last_mod = HashMap::new();
        if let Some(settings) = world.get_resource::<ConfigReloadSettings>() {
            for path in &settings.paths {
                if let Ok(t) = std::fs::metadata(path).and_then(|m| m.modified()) {
                    last_mod.insert(path.clone(), t);
                }
            }
        }
        Self {
            last_mod,
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
        }
    }
}

pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Update, poll_and_reload_config);
        }
    }
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut windows: Query<&mut Window>,
    controller: Option<ResMut<RoundController>>,
) {
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    let mut dirty = false;
    for path in &settings.paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let entry = state
            .last_mod
            .entry(path.clone())
            .or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    if !dirty {
        return;
    }
    let (new_cfg, _used, errors) = GameConfig::load_layered(settings.paths.iter());
    for e in errors {
        warn!("CONFIG HOT-RELOAD issue: {e}");
    }
    for w in new_cfg.validate() {
        warn!("CONFIG HOT-RELOAD warning: {w}");
    }
    if *cfg_res == new_cfg {
        return;
    }
    info!("Config hot-reload applied");
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window
                .resolution
                .set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    if let Some(mut controller) = controller {
        let tuning = RoundTuning::from(&new_cfg.round);
        if controller.tuning() != tuning {
            info!(target: "round", "Round tuning updated: {tuning:?}");
            controller.set_tuning(tuning);
        }
    }
    *cfg_res = new_cfg;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_skips_absent_overlays_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("game.ron");
        let local = dir.path().join("game.local.ron");
        let settings = ConfigReloadSettings {
            paths: vec![base.clone(), local.clone()],
            interval_secs: 0.5,
        };
        assert_eq!(settings.startup_paths(), vec![base.clone()]);

        std::fs::write(&local, "()").expect("create overlay");
        assert_eq!(settings.startup_paths(), vec![base, local]);
    }
}

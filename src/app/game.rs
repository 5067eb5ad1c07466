// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::hud::HudPlugin;
use crate::debug::DebugPlugin;
use crate::gameplay::flight::FlightPlugin;
use crate::gameplay::round_flow::RoundPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::interaction::session::controls::SessionControlsPlugin;
use crate::interaction::tap::TapPlugin;
use crate::rendering::highlight::HighlightPlugin;
use crate::rendering::scene::ScenePlugin;

/// Everything except `DefaultPlugins`. Insert `GameConfig` and `HighScoreStorage`
/// (and optionally a seeded `RoundRng`) before adding it.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RoundPlugin,
            FlightPlugin,
            TapPlugin,
            HighlightPlugin,
            SessionControlsPlugin,
            ScenePlugin,
            HudPlugin,
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
    }
}

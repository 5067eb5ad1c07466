use bevy::prelude::*;

use crate::core::events::{ResetHighScoreRequested, RestartRequested};
use crate::core::system::system_order::{configure_round_sets, RoundInputSet};

/// Keyboard shortcuts for the round actions the HUD buttons also expose.
pub struct SessionControlsPlugin;

impl Plugin for SessionControlsPlugin {
    fn build(&self, app: &mut App) {
        configure_round_sets(app);
        app.add_systems(Update, session_key_input.in_set(RoundInputSet));
    }
}

pub fn session_key_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut restart: EventWriter<RestartRequested>,
    mut reset: EventWriter<ResetHighScoreRequested>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.any_just_pressed([KeyCode::KeyR, KeyCode::Enter]) {
        info!(target: "session", "Restart requested (keyboard)");
        restart.write(RestartRequested);
    }
    if keys.just_pressed(KeyCode::Backspace) {
        info!(target: "session", "High score reset requested (keyboard)");
        reset.write(ResetHighScoreRequested);
    }
    if keys.just_pressed(KeyCode::Escape) {
        info!(target: "session", "Escape pressed, exiting");
        ev_exit.write(AppExit::Success);
    }
}

use bevy::prelude::*;

/// High-level screen state mirrored from the round controller.
/// Playing -> GameOver (miss) -> Playing (restart)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Ship is on its way; taps count.
    #[default]
    Playing,
    /// Round ended; score shown, restart / reset buttons visible.
    GameOver,
}

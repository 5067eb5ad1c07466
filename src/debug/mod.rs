//! Debug module: feature gated runtime stats & periodic logging.
//! Built only when compiled with `--features debug` (on by default).

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
pub mod stats; // pub for testing

#[cfg(feature = "debug")]
pub use stats::{DebugState, DebugStats};

#[cfg(feature = "debug")]
use crate::core::system::system_order::RoundPresentationSet;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .add_systems(
                Update,
                (stats::debug_stats_collect_system, logging::debug_logging_system)
                    .chain()
                    .after(RoundPresentationSet),
            );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}

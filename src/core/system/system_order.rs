//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. RoundInput (taps, highlight completion, flight arrival, keys/buttons -> events)
//! 2. RoundLogic (controller consumes events, emits spawns / round over)
//! 3. RoundPresentation (ship placement, visibility, HUD text)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RoundInputSet; // producers of round events

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RoundLogicSet; // the only place RoundController is mutated

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RoundPresentationSet; // reacts to controller output

/// Chain the three round sets in `Update`. Idempotent enough to call from each plugin.
pub fn configure_round_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            RoundInputSet,
            RoundLogicSet.after(RoundInputSet),
            RoundPresentationSet.after(RoundLogicSet),
        ),
    );
}

use bevy::prelude::*;

use crate::core::round::{RoundOutcome, Spawn};

/// Controller placed the ship for a new approach.
#[derive(Event, Debug, Clone, Copy)]
pub struct ShipSpawned(pub Spawn);

/// Tap on the ship completed its highlight.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ShipHit;

/// Ship finished its approach without being hit.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ShipReachedCamera;

#[derive(Event, Debug, Clone, Copy)]
pub struct RoundOver(pub RoundOutcome);

#[derive(Event, Debug, Default, Clone, Copy)]
pub struct RestartRequested;

#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ResetHighScoreRequested;

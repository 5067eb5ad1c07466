// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::components::{Highlight, Ship, ShipFlight};
use crate::core::events::{RoundOver, ShipReachedCamera, ShipSpawned};
use crate::core::system::system_order::{
    configure_round_sets, RoundInputSet, RoundPresentationSet,
};

/// Where every approach ends: the scene origin in front of the camera.
pub const FLIGHT_TARGET: Vec3 = Vec3::ZERO;

/// Moves the ship toward the camera and reports arrival.
pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        configure_round_sets(app);
        app.add_systems(Update, advance_flights.in_set(RoundInputSet))
            .add_systems(
                Update,
                (hide_ship_on_round_over, place_spawned_ship)
                    .chain()
                    .in_set(RoundPresentationSet),
            );
    }
}

/// Teleport the ship to its new start, face away from the camera, restart the approach.
/// Reuses an existing `ShipFlight` in place so a stale flight cannot finish this frame.
pub fn place_spawned_ship(
    mut commands: Commands,
    mut spawns: EventReader<ShipSpawned>,
    mut q: Query<
        (
            Entity,
            &mut Transform,
            &mut Visibility,
            Option<&mut ShipFlight>,
        ),
        With<Ship>,
    >,
) {
    // Only the newest spawn matters if several landed this frame.
    let Some(ShipSpawned(spawn)) = spawns.read().last().copied() else {
        return;
    };
    let start = spawn.position.to_vec3();
    for (entity, mut tf, mut vis, flight) in &mut q {
        tf.translation = start;
        tf.look_at(start * 2.0, Dir3::Y);
        *vis = Visibility::Inherited;
        let next = ShipFlight::new(start, FLIGHT_TARGET, spawn.duration);
        match flight {
            Some(mut f) => *f = next,
            None => {
                commands.entity(entity).insert(next);
            }
        }
        commands.entity(entity).remove::<Highlight>();
    }
}

pub fn advance_flights(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Transform, &mut ShipFlight), With<Ship>>,
    mut arrived: EventWriter<ShipReachedCamera>,
) {
    let dt = time.delta_secs();
    for (entity, mut tf, mut flight) in &mut q {
        let done = flight.advance(dt);
        tf.translation = flight.position();
        if done {
            commands.entity(entity).remove::<ShipFlight>();
            arrived.write(ShipReachedCamera);
        }
    }
}

/// The ship leaves the scene when the round ends.
pub fn hide_ship_on_round_over(
    mut commands: Commands,
    mut over: EventReader<RoundOver>,
    mut q: Query<(Entity, &mut Visibility), With<Ship>>,
) {
    if over.read().count() == 0 {
        return;
    }
    for (entity, mut vis) in &mut q {
        *vis = Visibility::Hidden;
        commands.entity(entity).remove::<(ShipFlight, Highlight)>();
    }
}

// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::components::{Highlight, Ship, ShipMaterial};
use crate::core::config::GameConfig;
use crate::core::events::ShipHit;
use crate::core::system::system_order::{
    configure_round_sets, RoundInputSet, RoundPresentationSet,
};

/// Red flash on a tapped ship. The hit is reported when the flash ends.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        configure_round_sets(app);
        app.add_systems(Update, finish_highlights.in_set(RoundInputSet))
            .add_systems(Update, tint_highlighted_ships.in_set(RoundPresentationSet));
    }
}

pub fn finish_highlights(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Highlight), With<Ship>>,
    mut hits: EventWriter<ShipHit>,
) {
    for (entity, mut highlight) in &mut q {
        if highlight.tick(time.delta()).finished() {
            commands.entity(entity).remove::<Highlight>();
            hits.write(ShipHit);
        }
    }
}

/// Keep emission in sync with highlight presence. Only touches the asset when it
/// actually differs, so unchanged frames don't re-upload the material.
fn tint_highlighted_ships(
    cfg: Res<GameConfig>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    q: Query<(&ShipMaterial, Has<Highlight>), With<Ship>>,
) {
    let Some(mut materials) = materials else {
        return;
    };
    let [r, g, b] = cfg.highlight.color;
    let lit = LinearRgba::rgb(r, g, b);
    for (mat, highlighted) in &q {
        let want = if highlighted { lit } else { LinearRgba::BLACK };
        let current = materials.get(&mat.0).map(|m| m.emissive);
        if current.is_some_and(|c| c != want) {
            if let Some(m) = materials.get_mut(&mat.0) {
                m.emissive = want;
            }
        }
    }
}

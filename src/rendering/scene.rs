// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::core::components::{MainCamera, Ship, ShipMaterial, ShipRadius};
use crate::core::config::GameConfig;
use crate::core::round::RoundController;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_camera_and_lights, spawn_ship));
    }
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

fn setup_camera_and_lights(mut commands: Commands, cfg: Res<GameConfig>) {
    let scene = &cfg.scene;
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(vec3(scene.camera_position))
            .looking_to(Dir3::NEG_Z, Dir3::Y),
        MainCamera,
    ));
    commands.spawn((
        PointLight {
            intensity: scene.light_intensity,
            range: 250.0,
            ..default()
        },
        Transform::from_translation(vec3(scene.light_position)),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.25),
        brightness: scene.ambient_brightness,
        ..default()
    });
}

/// Build the ship from primitives: a cone fuselage (nose along local -Z) and a flat wing.
/// Starts hidden at the spawn depth; the first `ShipSpawned` places and reveals it.
fn spawn_ship(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GameConfig>,
    controller: Res<RoundController>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.78, 0.8, 0.85),
        emissive: LinearRgba::BLACK,
        metallic: 0.4,
        perceptual_roughness: 0.5,
        ..default()
    });
    let fuselage = meshes.add(Cone {
        radius: 1.0,
        height: 5.0,
    });
    let wing = meshes.add(Cuboid::new(6.0, 0.25, 1.6));
    let tail = meshes.add(Cuboid::new(0.25, 1.4, 1.0));

    let start = Vec3::new(0.0, 0.0, controller.tuning().spawn_z as f32);
    commands
        .spawn((
            Ship,
            ShipRadius(cfg.scene.ship_radius),
            ShipMaterial(material.clone()),
            Transform::from_translation(start),
            Visibility::Hidden,
            Name::new("ship"),
        ))
        .with_children(|p| {
            p.spawn((
                Mesh3d(fuselage),
                MeshMaterial3d(material.clone()),
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));
            p.spawn((
                Mesh3d(wing),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, 0.0, 0.6),
            ));
            p.spawn((
                Mesh3d(tail),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, 0.7, 1.8),
            ));
        });
}

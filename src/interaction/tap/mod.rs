// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::components::{Highlight, MainCamera, Ship, ShipRadius};
use crate::core::config::GameConfig;
use crate::core::round::RoundController;
use crate::core::system::system_order::{configure_round_sets, RoundInputSet};

/// Emitted when a tap lands on the ship and its highlight starts.
#[derive(Event, Debug, Clone, Copy)]
pub struct ShipTapped {
    pub entity: Entity,
    pub distance: f32,
}

/// World-space ray of a finished tap, before hit testing.
#[derive(Event, Debug, Clone, Copy)]
pub struct TapRay(pub Ray3d);

pub struct TapPlugin;

impl Plugin for TapPlugin {
    fn build(&self, app: &mut App) {
        configure_round_sets(app);
        app.add_event::<TapRay>()
            .add_event::<ShipTapped>()
            .add_systems(
                Update,
                (pointer_to_tap_ray, resolve_taps)
                    .chain()
                    .in_set(RoundInputSet),
            );
    }
}

/// Nearest non-negative ray parameter where the ray meets the sphere.
/// `dir` must be normalized. Origin inside the sphere counts as a hit at the exit point.
pub fn ray_sphere_hit(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    if radius <= 0.0 || !origin.is_finite() || !dir.is_finite() {
        return None;
    }
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let s = disc.sqrt();
    let near = -b - s;
    let far = -b + s;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Closest ship hit by the ray, as (entity, distance along the ray).
pub fn pick_ship<'a, I>(ray: Ray3d, ships: I) -> Option<(Entity, f32)>
where
    I: IntoIterator<Item = (Entity, &'a GlobalTransform, &'a ShipRadius)>,
{
    let mut best: Option<(Entity, f32)> = None;
    for (entity, gt, radius) in ships {
        let Some(t) = ray_sphere_hit(ray.origin, *ray.direction, gt.translation(), radius.0)
        else {
            continue;
        };
        if best.is_none_or(|(_, bt)| t < bt) {
            best = Some((entity, t));
        }
    }
    best
}

fn viewport_ray(
    camera_q: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    screen_pos: Vec2,
) -> Option<Ray3d> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world(cam_tf, screen_pos).ok()
}

/// Screen position of a finished tap: released touch first, else the cursor on mouse release.
fn released_pointer_pos(
    window: &Window,
    buttons: Option<&ButtonInput<MouseButton>>,
    touches: Option<&Touches>,
) -> Option<Vec2> {
    if let Some(touch) = touches.and_then(|t| t.iter_just_released().next()) {
        return Some(touch.position());
    }
    if buttons.is_some_and(|b| b.just_released(MouseButton::Left)) {
        return window.cursor_position();
    }
    None
}

fn pointer_to_tap_ray(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows_q: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut rays: EventWriter<TapRay>,
) {
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(screen_pos) = released_pointer_pos(window, buttons.as_deref(), touches.as_deref())
    else {
        return;
    };
    match viewport_ray(&camera_q, screen_pos) {
        Some(ray) => {
            rays.write(TapRay(ray));
        }
        None => debug!(target: "tap", "No camera ray for tap at {screen_pos}"),
    }
}

/// Hit-test tap rays against visible ships. Ignored while the round is over or a
/// highlight is still running; a hit starts the highlight.
pub fn resolve_taps(
    mut commands: Commands,
    mut rays: EventReader<TapRay>,
    controller: Res<RoundController>,
    cfg: Res<GameConfig>,
    ships: Query<
        (Entity, &GlobalTransform, &ShipRadius, &Visibility),
        (With<Ship>, Without<Highlight>),
    >,
    highlighted: Query<(), (With<Ship>, With<Highlight>)>,
    mut tapped: EventWriter<ShipTapped>,
) {
    // One highlight at a time, even for several taps in a frame.
    let mut busy = !highlighted.is_empty();
    for TapRay(ray) in rays.read() {
        if controller.is_game_over() || busy {
            debug!(target: "tap", "Tap ignored (round over or highlight running)");
            continue;
        }
        let candidates = ships
            .iter()
            .filter(|(_, _, _, vis)| **vis != Visibility::Hidden)
            .map(|(e, gt, r, _)| (e, gt, r));
        let Some((entity, distance)) = pick_ship(*ray, candidates) else {
            debug!(target: "tap", "Tap missed");
            continue;
        };
        info!(target: "tap", "Ship tapped at distance {distance:.1}");
        commands
            .entity(entity)
            .insert(Highlight::from_seconds(cfg.highlight.duration));
        tapped.write(ShipTapped { entity, distance });
        busy = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_center_hits_front_face() {
        let center = Vec3::new(0.0, 0.0, -45.0);
        let t = ray_sphere_hit(Vec3::new(0.0, 0.0, 15.0), Vec3::NEG_Z, center, 3.0).expect("hit");
        assert!((t - 57.0).abs() < 1e-3);
    }

    #[test]
    fn ray_offset_past_radius_misses() {
        let center = Vec3::new(0.0, 0.0, -45.0);
        let hit = ray_sphere_hit(Vec3::new(3.5, 0.0, 15.0), Vec3::NEG_Z, center, 3.0);
        assert!(hit.is_none());
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let hit = ray_sphere_hit(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 20.0), 3.0);
        assert!(hit.is_none());
    }

    #[test]
    fn origin_inside_sphere_hits_exit() {
        let t = ray_sphere_hit(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0).expect("hit");
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn pick_prefers_nearest_ship() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let near_tf = GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let far_tf = GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -60.0));
        let r = ShipRadius(3.0);
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 15.0), Dir3::NEG_Z);
        let picked = pick_ship(ray, [(far, &far_tf, &r), (near, &near_tf, &r)]);
        assert_eq!(picked.map(|(e, _)| e), Some(near));
    }
}

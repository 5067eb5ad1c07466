use bevy::prelude::*;

use flight_game::core::components::{Highlight, Ship, ShipRadius};
use flight_game::interaction::tap::{ShipTapped, TapPlugin, TapRay};
use flight_game::{GameConfig, RoundController, RoundTuning};

#[derive(Resource, Default)]
struct Tapped(Vec<Entity>);

fn collect_taps(mut ev: EventReader<ShipTapped>, mut seen: ResMut<Tapped>) {
    seen.0.extend(ev.read().map(|t| t.entity));
}

fn tap_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(GameConfig::default())
        .insert_resource(RoundController::new(RoundTuning::default(), 0))
        .add_plugins(TapPlugin)
        .init_resource::<Tapped>()
        .add_systems(Last, collect_taps);
    app
}

fn spawn_ship(app: &mut App, at: Vec3, visibility: Visibility) -> Entity {
    app.world_mut()
        .spawn((
            Ship,
            ShipRadius(3.0),
            Transform::from_translation(at),
            GlobalTransform::from_translation(at),
            visibility,
        ))
        .id()
}

fn tap_straight_ahead(app: &mut App) {
    let ray = Ray3d::new(Vec3::new(0.0, 0.0, 15.0), Dir3::NEG_Z);
    app.world_mut().send_event(TapRay(ray));
    app.update();
}

fn taps(app: &App) -> &[Entity] {
    &app.world().resource::<Tapped>().0
}

#[test]
fn hit_starts_highlight_and_reports_tap() {
    let mut app = tap_app();
    let ship = spawn_ship(&mut app, Vec3::new(0.0, 0.0, -45.0), Visibility::Inherited);
    tap_straight_ahead(&mut app);

    assert_eq!(taps(&app), &[ship]);
    let highlight = app.world().get::<Highlight>(ship).expect("highlight inserted");
    assert!((highlight.duration().as_secs_f32() - 0.2).abs() < 1e-6);
}

#[test]
fn tap_beside_the_ship_misses() {
    let mut app = tap_app();
    let ship = spawn_ship(&mut app, Vec3::new(10.0, 0.0, -45.0), Visibility::Inherited);
    tap_straight_ahead(&mut app);

    assert!(taps(&app).is_empty());
    assert!(app.world().get::<Highlight>(ship).is_none());
}

#[test]
fn taps_are_ignored_after_game_over() {
    let mut app = tap_app();
    let ship = spawn_ship(&mut app, Vec3::new(0.0, 0.0, -45.0), Visibility::Inherited);
    app.world_mut().resource_mut::<RoundController>().on_timeout();
    tap_straight_ahead(&mut app);

    assert!(taps(&app).is_empty());
    assert!(app.world().get::<Highlight>(ship).is_none());
}

#[test]
fn taps_are_ignored_while_a_highlight_runs() {
    let mut app = tap_app();
    let lit = spawn_ship(&mut app, Vec3::new(20.0, 0.0, -45.0), Visibility::Inherited);
    app.world_mut()
        .entity_mut(lit)
        .insert(Highlight::from_seconds(0.2));
    let other = spawn_ship(&mut app, Vec3::new(0.0, 0.0, -45.0), Visibility::Inherited);
    tap_straight_ahead(&mut app);

    assert!(taps(&app).is_empty());
    assert!(app.world().get::<Highlight>(other).is_none());
}

#[test]
fn hidden_ship_is_skipped_for_the_visible_one_behind() {
    let mut app = tap_app();
    let hidden = spawn_ship(&mut app, Vec3::new(0.0, 0.0, -10.0), Visibility::Hidden);
    let visible = spawn_ship(&mut app, Vec3::new(0.0, 0.0, -60.0), Visibility::Inherited);
    tap_straight_ahead(&mut app);

    assert_eq!(taps(&app), &[visible]);
    assert!(app.world().get::<Highlight>(hidden).is_none());
}

#[test]
fn two_taps_in_one_frame_start_one_highlight() {
    let mut app = tap_app();
    let ship = spawn_ship(&mut app, Vec3::new(0.0, 0.0, -45.0), Visibility::Inherited);
    let ray = Ray3d::new(Vec3::new(0.0, 0.0, 15.0), Dir3::NEG_Z);
    app.world_mut().send_event(TapRay(ray));
    app.world_mut().send_event(TapRay(ray));
    app.update();

    assert_eq!(taps(&app), &[ship]);
}

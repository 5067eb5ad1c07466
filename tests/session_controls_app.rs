use std::fs;
use std::time::{Duration, SystemTime};

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use rand::rngs::StdRng;
use rand::SeedableRng;

use flight_game::app::hud::{HudButton, HudPlugin};
use flight_game::core::events::{ResetHighScoreRequested, RestartRequested};
use flight_game::interaction::session::{
    ConfigHotReloadPlugin, ConfigReloadSettings, SessionControlsPlugin,
};
use flight_game::{AppState, GameConfig, RoundController, RoundTuning};

#[derive(Resource, Default)]
struct Requests {
    restarts: usize,
    resets: usize,
}

fn count_requests(
    mut restart: EventReader<RestartRequested>,
    mut reset: EventReader<ResetHighScoreRequested>,
    mut n: ResMut<Requests>,
) {
    n.restarts += restart.read().count();
    n.resets += reset.read().count();
}

fn request_counting_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_event::<RestartRequested>()
        .add_event::<ResetHighScoreRequested>()
        .init_resource::<Requests>()
        .add_systems(Last, count_requests);
    app
}

fn key_app() -> App {
    let mut app = request_counting_app();
    app.insert_resource(ButtonInput::<KeyCode>::default())
        .add_plugins(SessionControlsPlugin);
    app
}

fn press(app: &mut App, key: KeyCode) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.clear();
    input.press(key);
}

#[test]
fn r_and_enter_request_a_restart() {
    for key in [KeyCode::KeyR, KeyCode::Enter] {
        let mut app = key_app();
        press(&mut app, key);
        app.update();
        let n = app.world().resource::<Requests>();
        assert_eq!((n.restarts, n.resets), (1, 0), "{key:?}");
    }
}

#[test]
fn backspace_requests_a_high_score_reset() {
    let mut app = key_app();
    press(&mut app, KeyCode::Backspace);
    app.update();
    let n = app.world().resource::<Requests>();
    assert_eq!((n.restarts, n.resets), (0, 1));
    assert!(app.should_exit().is_none());
}

#[test]
fn escape_exits() {
    let mut app = key_app();
    press(&mut app, KeyCode::Escape);
    app.update();
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

fn hud_app() -> App {
    let mut app = request_counting_app();
    app.add_plugins(StatesPlugin)
        .init_state::<AppState>()
        .insert_resource(RoundController::new(RoundTuning::default(), 0))
        .add_plugins(HudPlugin);
    app.update();
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(AppState::GameOver);
    app.update();
    app
}

fn press_hud_button(app: &mut App, which: HudButton) {
    let mut q = app.world_mut().query::<(Entity, &HudButton)>();
    let button = q
        .iter(app.world())
        .find(|(_, b)| **b == which)
        .map(|(e, _)| e)
        .expect("game-over panel shows the button");
    app.world_mut()
        .entity_mut(button)
        .insert(Interaction::Pressed);
    app.update();
}

#[test]
fn hud_buttons_send_round_requests() {
    let mut app = hud_app();
    press_hud_button(&mut app, HudButton::Restart);
    {
        let n = app.world().resource::<Requests>();
        assert_eq!((n.restarts, n.resets), (1, 0));
    }
    press_hud_button(&mut app, HudButton::ResetHighScore);
    let n = app.world().resource::<Requests>();
    assert_eq!((n.restarts, n.resets), (1, 1));
}

#[test]
fn game_over_panel_leaves_with_the_state() {
    let mut app = hud_app();
    let mut q = app.world_mut().query::<&HudButton>();
    assert_eq!(q.iter(app.world()).count(), 2);

    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(AppState::Playing);
    app.update();
    let mut q = app.world_mut().query::<&HudButton>();
    assert_eq!(q.iter(app.world()).count(), 0);
}

fn touch_later(path: &std::path::Path) {
    let f = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .expect("open config");
    f.set_modified(SystemTime::now() + Duration::from_secs(60))
        .expect("bump mtime");
}

#[test]
fn hot_reload_retunes_live_round() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game.ron");
    fs::write(&path, "(round: (initial_duration: 10.0))").expect("seed config");

    let mut controller = RoundController::new(RoundTuning::default(), 0);
    controller.on_hit(&mut StdRng::seed_from_u64(1));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(ConfigReloadSettings {
            paths: vec![path.clone()],
            interval_secs: 0.05,
        })
        .insert_resource(GameConfig::default())
        .insert_resource(controller)
        .add_plugins(ConfigHotReloadPlugin);
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(
        app.world().resource::<RoundController>().tuning(),
        RoundTuning::default()
    );

    fs::write(
        &path,
        "(round: (initial_duration: 4.0, decay: 0.5, spawn_range: 5))",
    )
    .expect("rewrite config");
    touch_later(&path);
    for _ in 0..3 {
        app.update();
    }

    let c = app.world().resource::<RoundController>();
    let t = c.tuning();
    assert_eq!(t.initial_duration, 4.0);
    assert_eq!(t.decay, 0.5);
    assert_eq!(t.spawn_range, 5);
    assert_eq!(c.score(), 1);
    assert!((c.duration() - 9.0).abs() < 1e-5);
    assert_eq!(app.world().resource::<GameConfig>().round.spawn_range, 5);
}

#[test]
fn overlay_created_after_startup_is_picked_up() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    fs::write(&base, "(round: (initial_duration: 10.0))").expect("seed base");
    let settings = ConfigReloadSettings {
        paths: vec![base, local.clone()],
        interval_secs: 0.05,
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(settings)
        .insert_resource(GameConfig::default())
        .insert_resource(RoundController::new(RoundTuning::default(), 0))
        .add_plugins(ConfigHotReloadPlugin);
    app.update();

    fs::write(&local, "(round: (spawn_z: -40))").expect("create overlay");
    for _ in 0..3 {
        app.update();
    }
    let c = app.world().resource::<RoundController>();
    assert_eq!(c.tuning().spawn_z, -40);
}

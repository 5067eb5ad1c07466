// Exits the game after `window.autoClose` seconds (0 = disabled). Used for smoke runs,
// so the closing line reports where the round stood.

use crate::core::config::GameConfig;
use crate::core::round::RoundController;
use bevy::prelude::*;

#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, check_autoclose);
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    mut timer: Option<ResMut<AutoCloseTimer>>,
    controller: Option<Res<RoundController>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(t) = timer.as_mut() else {
        return;
    };
    t.tick(time.delta());
    if !t.just_finished() {
        return;
    }
    match controller {
        Some(c) => info!(
            "AutoClose: exiting (score={} high_score={} run={} game_over={})",
            c.score(),
            c.high_score(),
            c.run(),
            c.is_game_over()
        ),
        None => info!("AutoClose: timer finished, requesting app exit"),
    }
    ev_exit.write(AppExit::Success);
}

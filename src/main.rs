use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use flight_game::gameplay::RoundRng;
use flight_game::interaction::session::ConfigReloadSettings;
use flight_game::{GameConfig, GamePlugin, HighScoreStorage, HighScoreStore, RonKeyValueStore};

#[derive(Parser, Debug)]
#[command(about = "Tap the ship before it reaches you", version)]
struct Args {
    /// Config files layered in order (later wins). Defaults to assets/config/game.ron
    /// plus game.local.ron when present.
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
    /// Override `storage.path` for the high score file.
    #[arg(long)]
    high_score_file: Option<PathBuf>,
    /// Seed spawn placement for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Zero the stored high score before starting.
    #[arg(long)]
    reset_high_score: bool,
}

fn main() -> AppExit {
    let args = Args::parse();

    // Without --config the local override is polled even while absent, so creating
    // it later hot-reloads.
    let (config_paths, reload) = if args.configs.is_empty() {
        let reload = ConfigReloadSettings::default();
        (reload.startup_paths(), reload)
    } else {
        let reload = ConfigReloadSettings {
            paths: args.configs.clone(),
            ..default()
        };
        (args.configs.clone(), reload)
    };
    // Logging isn't up yet; report config problems on stderr.
    let (cfg, used, errors) = GameConfig::load_layered(&config_paths);
    for e in &errors {
        eprintln!("config: {e}");
    }
    for w in cfg.validate() {
        eprintln!("config warning: {w}");
    }
    if used.is_empty() {
        eprintln!("config: no file loaded, using defaults");
    }

    let store_path = args
        .high_score_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.storage.path));
    let mut store = RonKeyValueStore::new(store_path, cfg.storage.key.clone());
    if args.reset_high_score {
        if let Err(e) = store.save(0) {
            eprintln!("high score reset failed: {e:#}");
        }
    }

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(reload)
    .insert_resource(HighScoreStorage::new(store))
    .insert_resource(cfg);
    if let Some(seed) = args.seed {
        app.insert_resource(RoundRng::seeded(seed));
    }
    app.add_plugins(GamePlugin).run()
}

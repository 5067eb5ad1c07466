pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod persistence;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use app::state::AppState;
pub use crate::core::config::{GameConfig, WindowConfig};
pub use crate::core::round::{RoundController, RoundTuning, Spawn, SpawnPosition};
pub use persistence::{HighScoreStorage, HighScoreStore, MemoryStore, RonKeyValueStore};

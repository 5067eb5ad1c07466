pub mod config;

pub use config::{
    GameConfig, HighlightConfig, RoundConfig, SceneConfig, StorageConfig, WindowConfig,
};

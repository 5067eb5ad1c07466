//! High score persistence: a one-integer key-value store behind a trait so the
//! round logic never touches the filesystem directly.

pub mod store;

pub use store::{HighScoreStore, MemoryStore, RonKeyValueStore};

use bevy::prelude::*;

/// Bevy handle to whichever store the app was built with.
#[derive(Resource, Deref, DerefMut)]
pub struct HighScoreStorage(pub Box<dyn HighScoreStore>);

impl HighScoreStorage {
    pub fn new(store: impl HighScoreStore) -> Self {
        Self(Box::new(store))
    }

    /// Save and log; the in-memory high score stays authoritative on failure.
    pub fn persist(&mut self, value: u32) -> bool {
        match self.0.save(value) {
            Ok(()) => {
                info!(target: "storage", "High score saved: {value}");
                true
            }
            Err(e) => {
                warn!(target: "storage", "Failed to save high score {value}: {e:#}");
                false
            }
        }
    }
}

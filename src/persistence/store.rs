// This file is part of Flight Game.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use bevy::log::warn;
use ron::value::{Number, Value};

/// Durable home for the single high-score integer.
pub trait HighScoreStore: Send + Sync + 'static {
    /// Stored value, 0 when nothing was saved yet.
    fn load(&self) -> Result<u32>;
    fn save(&mut self, value: u32) -> Result<()>;
}

/// String-keyed RON map file; the high score is one integer entry.
/// Other keys in the file survive writes whatever their type.
#[derive(Debug, Clone)]
pub struct RonKeyValueStore {
    path: PathBuf,
    key: String,
}

impl RonKeyValueStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_map(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let txt = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        if txt.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        ron::from_str(&txt).with_context(|| format!("parse {}", self.path.display()))
    }

    /// Integer stored under `key`. Other keys may hold any RON value.
    pub fn get(&self, key: &str) -> Result<Option<i64>> {
        self.read_map()?
            .remove(key)
            .map(|v| {
                v.into_rust::<i64>().with_context(|| {
                    format!("{key} in {} is not an integer", self.path.display())
                })
            })
            .transpose()
    }

    /// Write `key = value`. An unreadable file is moved aside to `*.bak` and
    /// replaced, so a bad file never blocks saving.
    pub fn set(&mut self, key: &str, value: i64) -> Result<()> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                let bak = self.path.with_extension("ron.bak");
                warn!(
                    target: "storage",
                    "Replacing unreadable {} (copy kept at {}): {e:#}",
                    self.path.display(),
                    bak.display()
                );
                if let Err(e) = fs::copy(&self.path, &bak) {
                    warn!(target: "storage", "Backup of {} failed: {e}", self.path.display());
                }
                BTreeMap::new()
            }
        };
        map.insert(key.to_string(), Value::Number(Number::Integer(value)));
        let txt = ron::ser::to_string_pretty(&map, ron::ser::PrettyConfig::default())
            .context("serialize key-value map")?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        // Write-then-rename so a crash mid-write never truncates the file.
        let tmp = self.path.with_extension("ron.tmp");
        fs::write(&tmp, txt).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

impl HighScoreStore for RonKeyValueStore {
    fn load(&self) -> Result<u32> {
        match self.get(&self.key)? {
            Some(v) => u32::try_from(v)
                .with_context(|| format!("stored {} = {v} is not a valid score", self.key)),
            None => Ok(0),
        }
    }

    fn save(&mut self, value: u32) -> Result<()> {
        let key = self.key.clone();
        self.set(&key, i64::from(value))
    }
}

/// Process-local store; used headless and in tests. Clones share the same slot,
/// so a test can keep one handle and give the other to the app.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.inner.lock() {
            slot.value = Some(value);
        }
        store
    }

    pub fn value(&self) -> Option<u32> {
        self.inner.lock().ok().and_then(|slot| slot.value)
    }

    pub fn writes(&self) -> usize {
        self.inner.lock().map(|slot| slot.writes).unwrap_or(0)
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        let slot = self.inner.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        Ok(slot.value.unwrap_or(0))
    }

    fn save(&mut self, value: u32) -> Result<()> {
        let mut slot = self.inner.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        slot.value = Some(value);
        slot.writes += 1;
        Ok(())
    }
}

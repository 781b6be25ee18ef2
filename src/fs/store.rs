//! Key-value storage for level collections
//!
//! Each level is stored under its key (`n00Tanks`, ...) as a JSON object
//! mapping tank id to tank. Last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::errors::{Result, TanktrackError};
use crate::schemas::{Level, LevelTanks, Site, Tank, LEVELS};

use super::json::{read_json, write_json};
use super::paths::get_levels_dir;

/// A JSON key-value store
pub trait Store {
    /// Value under `key`, or `None` if nothing was stored
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

/// One pretty-printed JSON file per key in a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirStore { dir: dir.into() }
    }

    /// Store rooted at `.tanktrack/levels` under the data root
    pub fn open(root: &Path) -> Self {
        JsonDirStore::new(get_levels_dir(root))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains(['/', '\\']);
        if !valid {
            return Err(TanktrackError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Store for JsonDirStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(key)?;
        match read_json(&path) {
            Ok(value) => Ok(Some(value)),
            Err(TanktrackError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.key_path(key)?;
        write_json(&path, &value)?;
        tracing::debug!(key, path = %path.display(), "stored");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Value>>> {
        self.entries
            .lock()
            .map_err(|_| TanktrackError::Storage("memory store lock poisoned".to_string()))
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Every tank of a level; an absent level is empty
pub fn load_level(store: &dyn Store, level: Level) -> Result<LevelTanks> {
    match store.get(level.key())? {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            TanktrackError::InvalidJson(format!("Malformed level {}: {}", level.short_name(), e))
        }),
        None => Ok(LevelTanks::new()),
    }
}

pub fn save_level(store: &dyn Store, level: Level, tanks: &LevelTanks) -> Result<()> {
    let value =
        serde_json::to_value(tanks).map_err(|e| TanktrackError::InvalidJson(e.to_string()))?;
    store.set(level.key(), value)
}

/// A single tank, or `None` if the level has no tank with this id
pub fn load(store: &dyn Store, level: Level, tank_id: &str) -> Result<Option<Tank>> {
    Ok(load_level(store, level)?.remove(tank_id))
}

/// Write a tank into its level collection, replacing any previous record
pub fn save(store: &dyn Store, level: Level, tank_id: &str, tank: &Tank) -> Result<()> {
    let mut tanks = load_level(store, level)?;
    tanks.insert(tank_id.to_string(), tank.clone());
    save_level(store, level, &tanks)?;
    tracing::debug!(level = level.short_name(), tank = tank_id, "saved tank");
    Ok(())
}

/// Every level of the site
pub fn load_site(store: &dyn Store) -> Result<Site> {
    let mut site = Site::default();
    for &level in LEVELS {
        *site.level_mut(level) = load_level(store, level)?;
    }
    Ok(site)
}

pub fn save_site(store: &dyn Store, site: &Site) -> Result<()> {
    for &level in LEVELS {
        save_level(store, level, site.level(level))?;
    }
    Ok(())
}

//! Key-value score persistence
//!
//! Stores:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;

use crate::error::StoreError;

/// Integer key-value store backing the best score
pub trait ScoreStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: u32) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_string(), value);
        Self { values, writes: 0 }
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON object file holding `{ key: value }` pairs
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$NINE_MATCH_SAVE`, else `~/.nine_match_scores.json`
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(path) = std::env::var_os("NINE_MATCH_SAVE") {
            return Some(std::path::PathBuf::from(path));
        }
        std::env::var_os("HOME")
            .map(|home| std::path::PathBuf::from(home).join(".nine_match_scores.json"))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, u32>) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Parse a score kept as text (LocalStorage stores strings)
pub fn parse_stored(key: &str, raw: &str) -> Result<u32, StoreError> {
    raw.trim().parse().map_err(|_| {
        log::warn!("Stored value for {} is not a score: {:?}", key, raw);
        StoreError::Malformed {
            key: key.to_string(),
            raw: raw.to_string(),
        }
    })
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(Some(raw)) => parse_stored(key, &raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StoreError::Unavailable)
    }
}

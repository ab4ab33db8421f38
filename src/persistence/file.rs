//! JSON file backend for native builds
//!
//! The whole store is one JSON object (`{"key": "value", ...}`), rewritten
//! in full on every write through a temp file and rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// Key-value store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current map; a missing or corrupt file reads as empty
    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&json) {
            Ok(map) => Ok(map),
            Err(err) => {
                log::warn!("Ignoring corrupt store {}: {}", self.path.display(), err);
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(map)
            .map_err(|err| StorageError::Io(std::io::Error::other(err)))?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

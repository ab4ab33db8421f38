//! Key-value persistence
//!
//! Features:
//! - `Storage` trait over string keys/values
//! - In-memory backend (tests, headless runs)
//! - JSON file backend (native)
//! - LocalStorage backend (browser)
//!
//! Callers treat every backend as best-effort: a failed read means "nothing
//! stored" and a failed write is logged and dropped.

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

use std::fmt;

/// Why a storage operation failed
#[derive(Debug)]
pub enum StorageError {
    /// The backend is not reachable (no window, private mode, ...)
    Unavailable,
    /// The backend rejected the write (quota exceeded)
    Quota,
    /// Underlying I/O failure
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Quota => write!(f, "storage quota exceeded"),
            StorageError::Io(err) => write!(f, "storage I/O error: {}", err),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// A string key-value store scoped to this game
pub trait Storage {
    /// Read a value (`Ok(None)` when the key is absent)
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

use std::collections::HashMap;

use super::{Storage, StorageError};

/// Process-local storage; contents vanish with the value
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    /// Fail every write (exercises best-effort callers)
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes as if the quota were exhausted
    pub fn read_only() -> Self {
        Self {
            items: HashMap::new(),
            read_only: true,
        }
    }

    /// Seed a raw value regardless of the read-only flag
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Quota);
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

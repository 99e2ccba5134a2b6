//! Key-value persistence for ledger blobs and small UI state.

pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::Result;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub const DEFAULT_KEY_PREFIX: &str = "finance-";
pub const DEFAULT_TAB_KEY: &str = "finance-active-tab";

/// Abstraction over string-keyed blob stores.
///
/// Implementations must serialize access internally; callers may share a store across
/// threads, but every `set`/`remove` has to land as a whole.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Names the keys a ledger workbook uses inside a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
    tab_key: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>, tab_key: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            tab_key: tab_key.into(),
        }
    }

    pub fn year_key(&self, year: i32) -> String {
        format!("{}{}", self.prefix, year)
    }

    pub fn tab_key(&self) -> &str {
        &self.tab_key
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX, DEFAULT_TAB_KEY)
    }
}

/// Reads a key and parses it as JSON.
///
/// Missing keys, read failures and malformed blobs all come back as `None`; the caller decides
/// what an empty value means.
pub fn read_json(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "storage read failed, treating as empty");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding malformed blob");
            None
        }
    }
}

/// Typed variant of [`read_json`].
pub fn read_typed<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let value = read_json(store, key)?;
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(err) => {
            tracing::warn!(key, error = %err, "blob has unexpected shape");
            None
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

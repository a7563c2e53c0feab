// ============================================================================
// STORAGE - Durable key/value access (localStorage or in-memory)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

use crate::error::StorageError;

/// Minimal string store shared by the session store and preferences
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Browser `localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|_| StorageError::Remove(key.to_string()))
    }
}

/// In-memory store, clones share the same map
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn save_to_storage<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json =
        serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.set_item(key, &json)
}

/// Corrupt entries read as absent
pub fn load_from_storage<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Ignoring unreadable '{}': {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pref {
        lang: String,
    }

    #[test]
    fn memory_storage_clones_share_items() {
        let store = MemoryStorage::new();
        let other = store.clone();
        store.set_item("k", "v").unwrap();
        assert_eq!(other.get_item("k").as_deref(), Some("v"));
        other.remove_item("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn json_helpers_round_trip_and_skip_garbage() {
        let store = MemoryStorage::new();
        save_to_storage(&store, "pref", &Pref { lang: "id".into() }).unwrap();
        assert_eq!(
            load_from_storage::<Pref>(&store, "pref"),
            Some(Pref { lang: "id".into() })
        );

        store.set_item("pref", "{not json").unwrap();
        assert_eq!(load_from_storage::<Pref>(&store, "pref"), None);
    }
}

// ============================================================================
// SESSION STORE - Bearer token + cached profile in durable storage
// ============================================================================
// Survives reloads. Nothing here validates the token: the backend rejects
// stale or forged tokens on every call.
// ============================================================================

use std::rc::Rc;

use crate::error::StorageError;
use crate::models::{PendingVerification, UserProfile};
use crate::utils::storage::{load_from_storage, save_to_storage};
use crate::utils::{
    KeyValueStore, LocalStorage, STORAGE_KEY_TEMP_EMAIL, STORAGE_KEY_TEMP_PHONE,
    STORAGE_KEY_TEMP_TOKEN, STORAGE_KEY_TOKEN, STORAGE_KEY_USER,
};

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Store backed by the browser's localStorage
    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStorage))
    }

    /// Persist token and profile under the fixed keys. The token is written
    /// last so a failed write never leaves a token without its profile.
    pub fn set_session(&self, token: &str, profile: &UserProfile) -> Result<(), StorageError> {
        save_to_storage(self.storage.as_ref(), STORAGE_KEY_USER, profile)?;
        if let Err(e) = self.storage.set_item(STORAGE_KEY_TOKEN, token) {
            let _ = self.storage.remove_item(STORAGE_KEY_USER);
            return Err(e);
        }
        log::info!("💾 [SESSION] Session stored for user {}", profile.id);
        Ok(())
    }

    /// Persisted token; an empty string counts as absent
    pub fn get_token(&self) -> Option<String> {
        self.storage
            .get_item(STORAGE_KEY_TOKEN)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn cached_profile(&self) -> Option<UserProfile> {
        load_from_storage(self.storage.as_ref(), STORAGE_KEY_USER)
    }

    /// Replace the cached profile after a profile fetch, keeping the token
    pub fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        save_to_storage(self.storage.as_ref(), STORAGE_KEY_USER, profile)
    }

    /// Logout: drop token and cached profile
    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.storage.remove_item(STORAGE_KEY_TOKEN)?;
        self.storage.remove_item(STORAGE_KEY_USER)?;
        log::info!("🗑️ [SESSION] Session cleared");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pre-profile-completion keys (registration / OTP)
    // ------------------------------------------------------------------

    pub fn set_pending(&self, pending: &PendingVerification) -> Result<(), StorageError> {
        self.put_or_remove(STORAGE_KEY_TEMP_TOKEN, pending.temp_token.as_deref())?;
        self.put_or_remove(STORAGE_KEY_TEMP_PHONE, pending.phone.as_deref())?;
        self.put_or_remove(STORAGE_KEY_TEMP_EMAIL, pending.email.as_deref())?;
        Ok(())
    }

    pub fn pending(&self) -> PendingVerification {
        PendingVerification {
            temp_token: self.non_empty(STORAGE_KEY_TEMP_TOKEN),
            phone: self.non_empty(STORAGE_KEY_TEMP_PHONE),
            email: self.non_empty(STORAGE_KEY_TEMP_EMAIL),
        }
    }

    pub fn temp_token(&self) -> Option<String> {
        self.non_empty(STORAGE_KEY_TEMP_TOKEN)
    }

    pub fn set_temp_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(STORAGE_KEY_TEMP_TOKEN, token)
    }

    pub fn clear_pending(&self) -> Result<(), StorageError> {
        self.storage.remove_item(STORAGE_KEY_TEMP_TOKEN)?;
        self.storage.remove_item(STORAGE_KEY_TEMP_PHONE)?;
        self.storage.remove_item(STORAGE_KEY_TEMP_EMAIL)?;
        Ok(())
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).filter(|v| !v.trim().is_empty())
    }

    fn put_or_remove(&self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        match value {
            Some(v) => self.storage.set_item(key, v),
            None => self.storage.remove_item(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    fn store() -> (SessionStore, MemoryStorage) {
        let memory = MemoryStorage::new();
        (SessionStore::new(Rc::new(memory.clone())), memory)
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-9".into(),
            name: "Rina".into(),
            profile_completed: true,
            ..Default::default()
        }
    }

    #[test]
    fn set_then_get_returns_same_token() {
        let (store, _) = store();
        store.set_session("tok-123", &profile()).unwrap();
        assert_eq!(store.get_token().as_deref(), Some("tok-123"));
        assert_eq!(store.cached_profile(), Some(profile()));
    }

    #[test]
    fn clear_then_get_returns_none() {
        let (store, memory) = store();
        store.set_session("tok-123", &profile()).unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.get_token(), None);
        assert_eq!(store.cached_profile(), None);
        assert!(memory.is_empty());
    }

    #[test]
    fn reads_survive_a_new_store_over_same_storage() {
        let (store, memory) = store();
        store.set_session("tok-abc", &profile()).unwrap();
        let reloaded = SessionStore::new(Rc::new(memory));
        assert_eq!(reloaded.get_token().as_deref(), Some("tok-abc"));
    }

    /// Refuses writes to one key, like a full quota would
    struct RejectingStorage {
        inner: MemoryStorage,
        rejected_key: &'static str,
    }

    impl KeyValueStore for RejectingStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.rejected_key {
                return Err(StorageError::Write(key.to_string()));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn failed_profile_write_stores_no_token() {
        let memory = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(RejectingStorage {
            inner: memory.clone(),
            rejected_key: STORAGE_KEY_USER,
        }));
        assert_eq!(
            store.set_session("tok", &profile()),
            Err(StorageError::Write(STORAGE_KEY_USER.to_string()))
        );
        assert_eq!(store.get_token(), None);
        assert!(memory.is_empty());
    }

    #[test]
    fn failed_token_write_drops_the_profile() {
        let memory = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(RejectingStorage {
            inner: memory.clone(),
            rejected_key: STORAGE_KEY_TOKEN,
        }));
        assert!(store.set_session("tok", &profile()).is_err());
        assert_eq!(store.cached_profile(), None);
        assert!(memory.is_empty());
    }

    #[test]
    fn empty_token_is_absent() {
        let (store, memory) = store();
        memory.set_item(STORAGE_KEY_TOKEN, "").unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn pending_keys_are_independent_of_session() {
        let (store, memory) = store();
        store
            .set_pending(&PendingVerification {
                temp_token: Some("tmp".into()),
                phone: Some("0812".into()),
                email: None,
            })
            .unwrap();
        assert_eq!(store.pending().phone.as_deref(), Some("0812"));
        assert_eq!(store.get_token(), None);

        store.set_session("tok", &profile()).unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.temp_token().as_deref(), Some("tmp"));

        store.clear_pending().unwrap();
        assert!(store.pending().is_empty());
        assert!(memory.is_empty());
    }
}

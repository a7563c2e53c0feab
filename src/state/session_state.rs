// ============================================================================
// SESSION CONTEXT - Injected into every collaborator that needs auth
// ============================================================================
// Wraps the durable SessionStore and adds the typed expiry check used before
// any authorization decision (route guard, bearer header).
// ============================================================================

use std::rc::Rc;

use crate::error::StorageError;
use crate::models::UserProfile;
use crate::services::session_store::SessionStore;
use crate::utils::TokenClaims;

type Clock = Rc<dyn Fn() -> i64>;

#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
    clock: Clock,
}

impl SessionContext {
    pub fn new(store: SessionStore) -> Self {
        Self::with_clock(store, Rc::new(|| chrono::Utc::now().timestamp()))
    }

    /// Clock returns unix seconds
    pub fn with_clock(store: SessionStore, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Raw persisted token, expired or not
    pub fn token(&self) -> Option<String> {
        self.store.get_token()
    }

    /// Decoded claims of the current token, for display
    pub fn claims(&self) -> Option<TokenClaims> {
        TokenClaims::from_token(&self.token()?)
    }

    /// A token is present and its `exp` (if any) is in the future.
    /// Opaque tokens without readable claims are trusted until the backend
    /// rejects them.
    pub fn is_authenticated(&self) -> bool {
        match self.token() {
            Some(token) => !TokenClaims::from_token(&token)
                .is_some_and(|claims| claims.is_expired((self.clock)())),
            None => false,
        }
    }

    /// Token to send as `Authorization: Bearer`, `None` once expired
    pub fn authorization_token(&self) -> Option<String> {
        if self.is_authenticated() {
            self.token()
        } else {
            None
        }
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.store.cached_profile()
    }

    pub fn display_name(&self) -> Option<String> {
        if let Some(profile) = self.profile() {
            return Some(profile.display_name());
        }
        let claims = self.claims()?;
        claims.name.or(claims.email)
    }

    /// Start a session and drop any registration leftovers
    pub fn begin(&self, token: &str, profile: &UserProfile) -> Result<(), StorageError> {
        self.store.set_session(token, profile)?;
        self.store.clear_pending()
    }

    pub fn end(&self) -> Result<(), StorageError> {
        self.store.clear_session()
    }
}

//! Session store: the single owner of the authenticated identity.

use std::sync::Arc;

use tokio::sync::watch;

use smartskills_core::Identity;

use super::storage::{SessionStorage, StorageError};

/// Durable-storage key the identity entry lives under.
pub const SESSION_KEY: &str = "user";

/// Owns the current session identity and broadcasts every change.
///
/// The store is the only writer of session state. Consumers either read
/// synchronously with [`current`](Self::current) or [`subscribe`](Self::subscribe)
/// and observe every establish/clear. Cloning the store shares the same
/// state; there is at most one identity at a time.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    storage: Box<dyn SessionStorage>,
    state: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    /// Open the store, restoring any persisted identity.
    ///
    /// A missing, unreadable, or malformed entry yields the logged-out
    /// state; restoration never fails.
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let restored = storage
            .load(SESSION_KEY)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "session entry unreadable, starting logged out");
                None
            })
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let (state, _) = watch::channel(restored);
        Self {
            inner: Arc::new(StoreInner {
                storage: Box::new(storage),
                state,
            }),
        }
    }

    /// Current identity, if a session is active. Synchronous, no side
    /// effects.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.inner.state.borrow().clone()
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_some()
    }

    /// Replace the current identity, mirror it to durable storage, and
    /// notify observers.
    ///
    /// The in-memory session is authoritative: it is established (and
    /// observers notified) even when the durable write fails, in which
    /// case the error is returned for the caller to log.
    ///
    /// # Errors
    ///
    /// Returns the storage failure when the durable mirror could not be
    /// written.
    pub fn establish(&self, identity: Identity) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&identity)?;
        self.inner.state.send_replace(Some(identity));
        self.inner.storage.store(SESSION_KEY, &serialized)
    }

    /// Remove the current identity, delete the durable entry, and notify
    /// observers.
    ///
    /// # Errors
    ///
    /// Returns the storage failure when the durable entry could not be
    /// deleted; the in-memory session is cleared regardless.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.inner.state.send_replace(None);
        self.inner.storage.remove(SESSION_KEY)
    }

    /// Subscribe to session changes.
    ///
    /// The receiver holds the value at subscription time and is marked
    /// changed by every subsequent establish or clear.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.inner.state.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::storage::MemoryStorage;
    use super::*;

    fn seeded(raw: Option<&str>) -> MemoryStorage {
        let storage = MemoryStorage::new();
        if let Some(raw) = raw {
            storage.store(SESSION_KEY, raw).unwrap();
        }
        storage
    }

    /// Storage double whose writes always fail.
    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn store(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn test_open_without_entry_is_logged_out() {
        let store = SessionStore::open(seeded(None));
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_open_with_malformed_entry_is_logged_out() {
        for raw in ["not json", "42", r#"{"email":"a@b.com"}"#] {
            let store = SessionStore::open(seeded(Some(raw)));
            assert!(store.current().is_none(), "entry {raw:?} should fail open");
        }
    }

    #[test]
    fn test_open_with_unreadable_backend_is_logged_out() {
        let store = SessionStore::open(BrokenStorage);
        assert!(store.current().is_none());
    }

    #[test]
    fn test_open_restores_valid_entry() {
        let store = SessionStore::open(seeded(Some(r#"{"email":"a@b.com","token":"tok"}"#)));
        assert_eq!(store.current(), Some(Identity::new("a@b.com", "tok")));
    }

    #[test]
    fn test_establish_then_current_returns_identity() {
        let storage = MemoryStorage::new();
        let store = SessionStore::open(storage);

        let identity = Identity::new("a@b.com", "tok");
        store.establish(identity.clone()).unwrap();

        assert_eq!(store.current(), Some(identity));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_then_current_returns_none() {
        let store = SessionStore::open(MemoryStorage::new());
        store.establish(Identity::new("a@b.com", "tok")).unwrap();

        store.clear().unwrap();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_establish_survives_reopen() {
        // Same backend, new store: simulates a process restart.
        let storage = MemoryStorage::new();
        storage
            .store(SESSION_KEY, r#"{"email":"a@b.com","token":"tok"}"#)
            .unwrap();

        let store = SessionStore::open(storage);
        assert_eq!(store.current(), Some(Identity::new("a@b.com", "tok")));
    }

    #[test]
    fn test_observers_see_every_change() {
        let store = SessionStore::open(MemoryStorage::new());
        let mut observer = store.subscribe();
        assert!(observer.borrow_and_update().is_none());

        store.establish(Identity::new("a@b.com", "tok")).unwrap();
        assert!(observer.has_changed().unwrap());
        assert!(observer.borrow_and_update().is_some());

        store.clear().unwrap();
        assert!(observer.has_changed().unwrap());
        assert!(observer.borrow_and_update().is_none());
    }

    #[test]
    fn test_establish_with_broken_backend_still_establishes() {
        let store = SessionStore::open(BrokenStorage);
        let result = store.establish(Identity::new("a@b.com", "tok"));

        assert!(result.is_err());
        assert!(store.is_authenticated());
    }
}

//! Durable single-slot storage for the session bearer token.

use secrecy::{ExposeSecret, Secret};
use std::sync::{Mutex, PoisonError};

/// Single-slot secret storage for the bearer token.
///
/// Implementations never surface storage failures to callers: a failed
/// load degrades to "no stored token" and a failed save or clear is
/// logged, so startup logic is never blocked on the platform keychain.
pub trait CredentialStore: Send + Sync {
    /// Overwrite any stored token. Subsequent loads return this value
    /// until it is changed or cleared.
    fn save(&self, token: &Secret<String>);

    /// The stored token, or `None` if there is none or the platform
    /// store reports any failure.
    fn load(&self) -> Option<Secret<String>>;

    /// Remove any stored token. Clearing an empty slot is not an error.
    fn clear(&self);
}

/// OS keychain-backed store via the `keyring` crate.
pub struct KeyringStore {
    service: String,
    account: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: "auth-token".to_string(),
        }
    }

    fn entry(&self) -> Option<keyring::Entry> {
        match keyring::Entry::new(&self.service, &self.account) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Platform keychain unavailable");
                None
            }
        }
    }
}

impl CredentialStore for KeyringStore {
    fn save(&self, token: &Secret<String>) {
        let Some(entry) = self.entry() else { return };
        // Delete-then-write so a failed overwrite cannot leave two
        // conflicting entries under the same key.
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => tracing::warn!(error = %e, "Could not remove previous token before save"),
        }
        if let Err(e) = entry.set_password(token.expose_secret()) {
            tracing::warn!(error = %e, "Could not persist token to keychain");
        }
    }

    fn load(&self) -> Option<Secret<String>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(token) => Some(Secret::new(token)),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Keychain read failed, treating token as absent");
                None
            }
        }
    }

    fn clear(&self) {
        let Some(entry) = self.entry() else { return };
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => tracing::warn!(error = %e, "Could not delete stored token"),
        }
    }
}

/// In-memory store for tests and hosts without a keychain.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Secret<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn save(&self, token: &Secret<String>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Secret::new(token.expose_secret().clone()));
    }

    fn load(&self) -> Option<Secret<String>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .map(|token| Secret::new(token.expose_secret().clone()))
    }

    fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_a_token() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&Secret::new("tok123".to_string()));
        assert_eq!(store.load().unwrap().expose_secret(), "tok123");

        store.save(&Secret::new("tok456".to_string()));
        assert_eq!(store.load().unwrap().expose_secret(), "tok456");
    }

    #[test]
    fn memory_store_clear_is_idempotent() {
        let store = MemoryStore::new();
        store.save(&Secret::new("tok123".to_string()));

        store.clear();
        assert!(store.load().is_none());

        // Clearing an empty slot is a no-op, not an error.
        store.clear();
        assert!(store.load().is_none());
    }
}

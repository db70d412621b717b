//! High-level API for the credential pair.

use crate::{CookieJar, CookieOptions, KeyValueStorage, StorageKeys, StorageResult};
use std::sync::Mutex;

/// A complete access/refresh credential pair.
///
/// Constructed only when both halves are present; callers never see a partial
/// pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The credential store capability.
///
/// Wraps the two persistence mediums: an expiring cookie for the short-lived
/// access credential and a durable key-value entry for the long-lived refresh
/// credential. Injected into the HTTP client and the session manager rather
/// than read as ambient state.
pub struct CredentialStore {
    jar: Mutex<CookieJar>,
    store: Box<dyn KeyValueStorage>,
}

impl CredentialStore {
    /// Create a credential store over the given durable backend.
    pub fn new(store: Box<dyn KeyValueStorage>) -> Self {
        Self {
            jar: Mutex::new(CookieJar::new()),
            store,
        }
    }

    // ==========================================
    // Access credential (cookie)
    // ==========================================

    /// Read the access credential from the cookie jar.
    pub fn access_token(&self) -> Option<String> {
        self.jar.lock().unwrap().read(StorageKeys::ACCESS_TOKEN)
    }

    /// Write the access credential cookie.
    pub fn set_access_token(&self, token: &str, options: CookieOptions) {
        self.jar
            .lock()
            .unwrap()
            .write(StorageKeys::ACCESS_TOKEN, token, options);
    }

    /// Expire the access credential cookie.
    pub fn clear_access_token(&self) {
        self.jar.lock().unwrap().remove(StorageKeys::ACCESS_TOKEN);
    }

    // ==========================================
    // Refresh credential (durable store)
    // ==========================================

    /// Read the refresh credential from the durable store.
    pub fn refresh_token(&self) -> StorageResult<Option<String>> {
        self.store.get(StorageKeys::REFRESH_TOKEN)
    }

    /// Store the refresh credential.
    pub fn set_refresh_token(&self, token: &str) -> StorageResult<()> {
        self.store.set(StorageKeys::REFRESH_TOKEN, token)
    }

    /// Delete the refresh credential.
    pub fn clear_refresh_token(&self) -> StorageResult<bool> {
        self.store.delete(StorageKeys::REFRESH_TOKEN)
    }

    /// Check if a refresh credential exists.
    pub fn has_refresh_token(&self) -> StorageResult<bool> {
        self.store.has(StorageKeys::REFRESH_TOKEN)
    }

    // ==========================================
    // Pair discipline
    // ==========================================

    /// Persist a complete credential pair (cookie + durable store).
    pub fn store_pair(&self, access_token: &str, refresh_token: &str) -> StorageResult<()> {
        self.set_access_token(access_token, CookieOptions::default());
        self.set_refresh_token(refresh_token)
    }

    /// The current pair, or `None` unless both halves are present.
    ///
    /// A torn write (crash between the cookie and the store) degrades to
    /// logged-out rather than a half-usable credential.
    pub fn credential_pair(&self) -> StorageResult<Option<CredentialPair>> {
        let access = self.access_token();
        let refresh = self.refresh_token()?;
        Ok(match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => Some(CredentialPair {
                access_token,
                refresh_token,
            }),
            _ => None,
        })
    }

    /// Clear both halves of the pair.
    pub fn clear_pair(&self) -> StorageResult<()> {
        self.clear_access_token();
        let _ = self.store.delete(StorageKeys::REFRESH_TOKEN);
        Ok(())
    }

    // ==========================================
    // Password reset flag
    // ==========================================

    /// Set the transient reset-in-progress flag.
    pub fn mark_reset_in_progress(&self) -> StorageResult<()> {
        self.store.set(StorageKeys::RESET_IN_PROGRESS, "true")
    }

    /// Check the reset-in-progress flag.
    pub fn reset_in_progress(&self) -> StorageResult<bool> {
        self.store.has(StorageKeys::RESET_IN_PROGRESS)
    }

    /// Clear the reset-in-progress flag.
    pub fn clear_reset_in_progress(&self) -> StorageResult<bool> {
        self.store.delete(StorageKeys::RESET_IN_PROGRESS)
    }

    /// Serialized cookie header, as a browser would expose it.
    pub fn cookie_header(&self) -> String {
        self.jar.lock().unwrap().header()
    }
}

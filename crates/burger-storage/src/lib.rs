//! Credential storage for the Stellar Burgers client engine.
//!
//! This crate provides the two persistence mediums the client relies on:
//! - an expiring [`CookieJar`] holding the short-lived access credential
//! - a durable [`KeyValueStorage`] holding the long-lived refresh credential
//!
//! [`CredentialStore`] wraps both behind a single injected capability.

mod cookie;
mod credentials;
mod file;
mod keys;
mod memory;
mod traits;

pub use cookie::{CookieJar, CookieOptions, Expiry};
pub use credentials::{CredentialPair, CredentialStore};
pub use file::JsonFileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use traits::KeyValueStorage;

use burger_core::Paths;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend error (e.g. home directory not found)
    #[error("Storage backend error: {0}")]
    Platform(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default durable storage implementation, a JSON file under the
/// client base directory.
pub fn create_storage() -> StorageResult<Box<dyn KeyValueStorage>> {
    let paths = Paths::new().map_err(|e| StorageError::Platform(e.to_string()))?;
    Ok(Box::new(JsonFileStorage::new(paths.local_store_file())))
}

/// Create a CredentialStore with the default durable storage.
pub fn create_credential_store() -> StorageResult<CredentialStore> {
    let storage = create_storage()?;
    Ok(CredentialStore::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_constants() {
        assert!(!StorageKeys::ACCESS_TOKEN.is_empty());
        assert!(!StorageKeys::REFRESH_TOKEN.is_empty());
        assert!(!StorageKeys::RESET_IN_PROGRESS.is_empty());

        let keys = vec![
            StorageKeys::ACCESS_TOKEN,
            StorageKeys::REFRESH_TOKEN,
            StorageKeys::RESET_IN_PROGRESS,
        ];
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len(), "Storage keys must be unique");
    }

    #[test]
    fn test_credential_store_over_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Box::new(JsonFileStorage::new(dir.path().join("store.json")));
        let store = CredentialStore::new(storage);

        store.store_pair("a", "r").unwrap();
        assert!(store.credential_pair().unwrap().is_some());

        // The refresh half is durable; the cookie half is per-process.
        let reopened = CredentialStore::new(Box::new(JsonFileStorage::new(
            dir.path().join("store.json"),
        )));
        assert_eq!(reopened.refresh_token().unwrap(), Some("r".to_string()));
        assert!(reopened.access_token().is_none());
        assert!(reopened.credential_pair().unwrap().is_none());
    }
}

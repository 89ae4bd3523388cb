//! API credential storage.
//!
//! A single bearer token persisted under a fixed key name in a local JSON
//! settings file. Absence is `Ok(None)`, never an error. Keys are wrapped in
//! `SecretString` on the way out so they never hit Debug output or logs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::StorageError;

/// Fixed settings key the token is stored under.
pub const API_KEY_NAME: &str = "straico_api_key";

/// get/set/clear for the stored API credential.
pub trait CredentialStore: Send + Sync {
    /// The stored key, or `None` when no key has been set.
    fn get(&self) -> Result<Option<SecretString>, StorageError>;
    fn set(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed store: a JSON object of settings at a fixed path.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_settings(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_settings(&self, settings: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<SecretString>, StorageError> {
        let settings = self.read_settings()?;
        Ok(settings
            .get(API_KEY_NAME)
            .map(|k| SecretString::from(k.clone())))
    }

    fn set(&self, key: &str) -> Result<(), StorageError> {
        let mut settings = self.read_settings()?;
        settings.insert(API_KEY_NAME.to_string(), key.to_string());
        self.write_settings(&settings)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut settings = self.read_settings()?;
        if settings.remove(API_KEY_NAME).is_some() {
            self.write_settings(&settings)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    key: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .key
            .lock()
            .expect("credential lock poisoned")
            .as_ref()
            .map(|k| SecretString::from(k.clone())))
    }

    fn set(&self, key: &str) -> Result<(), StorageError> {
        *self.key.lock().expect("credential lock poisoned") = Some(key.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.key.lock().expect("credential lock poisoned") = None;
        Ok(())
    }
}

/// Simulated key verification: accepts any non-empty key after the
/// artificial delay. No network I/O exists in this build.
pub async fn verify_key(key: &str, delay: Duration) -> bool {
    tokio::time::sleep(delay).await;
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn file_store() -> (tempfile::TempDir, FileCredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("settings.json"));
        (dir, store)
    }

    #[test]
    fn file_store_roundtrip() {
        let (_dir, store) = file_store();
        assert!(store.get().unwrap().is_none());

        store.set("sk-test-12345").unwrap();
        let key = store.get().unwrap().expect("key should be stored");
        assert_eq!(key.expose_secret(), "sk-test-12345");

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn file_store_overwrites_existing_key() {
        let (_dir, store) = file_store();
        store.set("first").unwrap();
        store.set("second").unwrap();
        let key = store.get().unwrap().unwrap();
        assert_eq!(key.expose_secret(), "second");
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("does/not/exist.json"));
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn clear_on_empty_store_is_noop() {
        let (_dir, store) = file_store();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn corrupt_settings_file_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store = FileCredentialStore::new(&path);
        assert!(matches!(
            store.get(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn in_memory_roundtrip() {
        let store = InMemoryCredentialStore::new();
        assert!(store.get().unwrap().is_none());
        store.set("abc").unwrap();
        assert_eq!(store.get().unwrap().unwrap().expose_secret(), "abc");
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[tokio::test]
    async fn verify_accepts_non_empty_key() {
        assert!(verify_key("sk-anything", Duration::ZERO).await);
        assert!(!verify_key("   ", Duration::ZERO).await);
        assert!(!verify_key("", Duration::ZERO).await);
    }
}

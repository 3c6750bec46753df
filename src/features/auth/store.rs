//! Persisted client session (token, user blob, refresh token).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::users::User;
use crate::shared::constants::{SESSION_TOKEN_KEY, SESSION_USER_KEY};

/// Key/value storage for session state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key.
    fn clear(&self) -> Result<()>;

    fn token(&self) -> Result<Option<String>> {
        Ok(self.get(SESSION_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Stored user blob, if present and decodable.
    fn user(&self) -> Result<Option<User>> {
        let Some(raw) = self.get(SESSION_USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Ignoring undecodable user blob in session: {}", e);
                Ok(None)
            }
        }
    }
}

/// JSON-file backed store. Every write rewrites the whole file.
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Storage(format!(
                    "Corrupt session file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read session file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("Failed to encode session: {}", e)))?;

        std::fs::write(&self.path, content).map_err(|e| {
            AppError::Storage(format!(
                "Failed to write session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<(T, bool)> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::Storage("Session lock poisoned".to_string()))?;

        let mut entries = self.read_all()?;
        let before = entries.clone();
        let out = f(&mut entries);
        let changed = before != entries;
        if changed {
            self.write_all(&entries)?;
        }
        Ok((out, changed))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.with_entries(|e| e.get(key).cloned())?.0)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|e| {
            e.insert(key.to_string(), value.to_string());
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|e| {
            e.remove(key);
        })?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::Storage("Session lock poisoned".to_string()))?;

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Process-local store, used for tests and short-lived sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(SESSION_TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("Session lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("Session lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("Session lock poisoned".to_string()))?
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("Session lock poisoned".to_string()))?
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::SESSION_REFRESH_TOKEN_KEY;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("civic-session-{}.json", uuid::Uuid::now_v7()))
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let path = temp_path();
        let store = FileSessionStore::new(&path);

        assert_eq!(store.token().unwrap(), None);
        store.set(SESSION_TOKEN_KEY, "abc").unwrap();
        store.set(SESSION_REFRESH_TOKEN_KEY, "r-1").unwrap();

        // a second handle sees the persisted values
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.token().unwrap().as_deref(), Some("abc"));

        reopened.remove(SESSION_REFRESH_TOKEN_KEY).unwrap();
        assert_eq!(store.get(SESSION_REFRESH_TOKEN_KEY).unwrap(), None);

        store.clear().unwrap();
        assert!(!path.exists());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let path = temp_path();
        std::fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::new(&path);

        assert!(matches!(store.get(SESSION_TOKEN_KEY), Err(AppError::Storage(_))));
        store.clear().unwrap();
    }

    #[test]
    fn test_user_blob() {
        let store = MemorySessionStore::new();
        assert!(store.user().unwrap().is_none());

        store
            .set(SESSION_USER_KEY, r#"{"name": "Asha", "role": "citizen"}"#)
            .unwrap();
        assert_eq!(
            store.user().unwrap().and_then(|u| u.name),
            Some("Asha".to_string())
        );

        store.set(SESSION_USER_KEY, "{broken").unwrap();
        assert!(store.user().unwrap().is_none());
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let store = MemorySessionStore::with_token("");
        assert_eq!(store.token().unwrap(), None);
    }
}

//! Durable key/value storage for session state.
//!
//! Both backends store plain strings under fixed names so hydration can
//! read them back without any schema. The JSON file plays the part a
//! browser's local storage would.

use crate::SessionError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Fixed key for the role string.
pub const ROLE_KEY: &str = "role";

/// Durable string storage for session fields.
pub trait SessionVault: Send + Sync {
    /// Read a value, `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write a value, overwriting any prior one.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory vault for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryVault {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionVault for MemoryVault {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

/// Vault backed by a JSON file on disk.
///
/// Each operation reads, modifies, and rewrites the whole file; session
/// state is two small strings, so there is nothing to optimize.
#[derive(Debug)]
pub struct JsonFileVault {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileVault {
    /// Create a vault at the given path. The file is created lazily on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The file this vault persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionVault for JsonFileVault {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_vault_round_trip() {
        let vault = MemoryVault::new();
        assert_eq!(vault.get(TOKEN_KEY).unwrap(), None);

        vault.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(vault.get(TOKEN_KEY).unwrap(), Some("abc".to_string()));

        vault.remove(TOKEN_KEY).unwrap();
        assert_eq!(vault.get(TOKEN_KEY).unwrap(), None);
        // Removing again is fine.
        vault.remove(TOKEN_KEY).unwrap();
    }

    #[test]
    fn test_file_vault_round_trip() {
        let path = std::env::temp_dir().join(format!("mithai-vault-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let vault = JsonFileVault::new(&path);
        assert_eq!(vault.get(TOKEN_KEY).unwrap(), None);

        vault.set(TOKEN_KEY, "abc").unwrap();
        vault.set(ROLE_KEY, "admin").unwrap();

        // A fresh vault over the same file sees the persisted values.
        let reopened = JsonFileVault::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap(), Some("abc".to_string()));
        assert_eq!(reopened.get(ROLE_KEY).unwrap(), Some("admin".to_string()));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);

        let _ = std::fs::remove_file(&path);
    }
}

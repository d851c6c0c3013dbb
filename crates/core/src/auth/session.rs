//! Key-value persistence for the signed-in user.
//!
//! The current user lives under [`CURRENT_USER_KEY`] as a JSON string, so a session written by
//! one process can be restored by the next.

use crate::constants::CURRENT_USER_KEY;
use crate::model::User;
use crate::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// String key-value storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> CoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove(&self, key: &str) -> CoreResult<()>;
}

/// Reads the stored user, if any.
///
/// A value that no longer parses as a [`User`] is reported as a deserialisation error rather
/// than silently dropped.
pub fn load_user(store: &dyn SessionStore) -> CoreResult<Option<User>> {
    match store.get(CURRENT_USER_KEY)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(CoreError::Deserialization),
        None => Ok(None),
    }
}

pub fn save_user(store: &dyn SessionStore, user: &User) -> CoreResult<()> {
    let json = serde_json::to_string(user).map_err(CoreError::Serialization)?;
    store.set(CURRENT_USER_KEY, &json)
}

pub fn clear_user(store: &dyn SessionStore) -> CoreResult<()> {
    store.remove(CURRENT_USER_KEY)
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change.
///
/// A missing file reads as an empty store. The file is created on first write; its parent
/// directory must already exist.
#[derive(Debug)]
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

    fn read_all(&self) -> CoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(CoreError::Deserialization),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(CoreError::FileRead(e)),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(entries).map_err(CoreError::Serialization)?;
        fs::write(&self.path, json).map_err(CoreError::FileWrite)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserType;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_user() -> User {
        User {
            id: "1".into(),
            email: "ana@correo.es".into(),
            display_name: "ana".into(),
            photo_url: None,
            phone: None,
            user_type: UserType::Patient,
            created_at: Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_memory_store_round_trips_user() {
        let store = MemorySessionStore::new();
        assert!(load_user(&store).expect("empty store").is_none());

        save_user(&store, &sample_user()).expect("should save");
        assert_eq!(load_user(&store).expect("should load"), Some(sample_user()));

        clear_user(&store).expect("should clear");
        assert!(load_user(&store).expect("should load").is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("session.json");

        let store = FileSessionStore::new(&path);
        assert!(load_user(&store).expect("missing file is empty").is_none());
        save_user(&store, &sample_user()).expect("should save");

        let raw = fs::read_to_string(&path).expect("should read session file");
        assert!(raw.contains(CURRENT_USER_KEY));

        let reopened = FileSessionStore::new(&path);
        assert_eq!(load_user(&reopened).expect("should load"), Some(sample_user()));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileSessionStore::new(temp_dir.path().join("session.json"));

        store.set("theme", "dark").expect("should set");
        save_user(&store, &sample_user()).expect("should save");
        clear_user(&store).expect("should clear");

        assert_eq!(store.get("theme").expect("should get").as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_user_is_an_error() {
        let store = MemorySessionStore::new();
        store.set(CURRENT_USER_KEY, "{not json").expect("should set");
        let err = load_user(&store).expect_err("corrupt value should fail");
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}

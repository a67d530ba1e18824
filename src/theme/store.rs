//! Key-value storage for the theme preference

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Key of the persisted theme preference
pub const THEME_KEY: &str = "theme";

/// A small string key-value store
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk
///
/// The file is read on every access, so changes made by another process are
/// seen immediately.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| Error::Preference {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(values).map_err(|e| Error::Preference {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read()?;
        values.insert(key.to_string(), value.to_string());
        self.write(&values)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut values = self.read()?;
        if values.remove(key).is_some() {
            self.write(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        store.remove(THEME_KEY).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".quillsite/preferences.json");

        let mut store = FileStore::new(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.set(THEME_KEY, "light").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        store.remove(THEME_KEY).unwrap();
        assert_eq!(reopened.get(THEME_KEY).unwrap(), None);
        assert!(!fs::read_to_string(&path).unwrap().contains("theme"));
    }

    #[test]
    fn test_file_store_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileStore::new(&path).get(THEME_KEY).unwrap_err();
        assert!(matches!(err, Error::Preference { .. }));
    }
}

//! Local key-value persistence.
//!
//! A small JSON file of string entries, standing in for a browser's local
//! storage. Only the signed-in user is kept here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, ShopError, User};

/// Key the signed-in user is stored under.
pub const USER_KEY: &str = "shop_orbit_user";

#[derive(Debug, Default)]
pub struct KeyValueStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KeyValueStore {
    /// Opens the store backed by `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| ShopError::StorageError(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ShopError::StorageError(format!("{}: {}", path.display(), e))),
        };
        Ok(Self { path: Some(path), entries })
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&str> { self.entries.get(key).map(String::as_str) }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else { return Ok(()) };
        let io_err = |e: std::io::Error| ShopError::StorageError(format!("{}: {}", path.display(), e));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries).map_err(|e| ShopError::StorageError(e.to_string()))?;
        fs::write(path, raw).map_err(io_err)
    }
}

/// The signed-in user slot of the key-value store.
#[derive(Debug)]
pub struct IdentityStore {
    store: KeyValueStore,
}

impl IdentityStore {
    pub fn new(store: KeyValueStore) -> Self { Self { store } }

    pub fn in_memory() -> Self { Self::new(KeyValueStore::in_memory()) }

    /// A corrupt entry reads as signed out.
    pub fn load(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable stored user");
                None
            }
        }
    }

    pub fn save(&mut self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user).map_err(|e| ShopError::StorageError(e.to_string()))?;
        self.store.set(USER_KEY, raw)
    }

    pub fn clear(&mut self) -> Result<()> { self.store.remove(USER_KEY) }
}

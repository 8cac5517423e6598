//! Durable string store and the collapsed-network set kept in it.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Key holding the JSON array of collapsed network uuids.
pub const COLLAPSED_KEY: &str = "crablounge.networks.collapsed";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode or decode store: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait StringStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Keeps every key in a single JSON object file.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.values)?)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

impl StringStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// Non-persistent store, used when the file store cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Uuids of the networks the user collapsed. Unreadable data counts as none.
pub fn collapsed_networks(store: &dyn StringStore) -> HashSet<String> {
    let Some(raw) = store.get(COLLAPSED_KEY) else {
        return HashSet::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(uuids) => uuids.into_iter().collect(),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable collapsed network list");
            HashSet::new()
        }
    }
}

/// Add or remove `uuid` from the persisted set.
pub fn set_collapsed(
    store: &mut dyn StringStore,
    uuid: &str,
    collapsed: bool,
) -> Result<(), StoreError> {
    let mut uuids = collapsed_networks(store);
    if collapsed {
        uuids.insert(uuid.to_string());
    } else {
        uuids.remove(uuid);
    }
    let mut sorted: Vec<String> = uuids.into_iter().collect();
    sorted.sort();
    store.set(COLLAPSED_KEY, serde_json::to_string(&sorted)?)
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
///
/// Nothing is cached: every read goes to the file, and every mutation
/// re-reads it before writing, so processes sharing the file see each
/// other's changes at their next access.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Storage opened");
        Self { path }
    }

    fn read_entries(path: &Path) -> Result<Entries> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(path)
            .context("Failed to read storage file")?;
        let entries = serde_json::from_str(&contents)
            .context("Failed to parse storage file")?;
        Ok(entries)
    }

    /// Current contents; an unreadable file is logged and treated as empty.
    fn load(&self) -> Entries {
        match Self::read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Ignoring unreadable storage file");
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write storage file: {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.persist(&BTreeMap::new())
    }
}

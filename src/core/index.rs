//! Persisted repository index.
//!
//! The index maps each cache key (see [`crate::core::url::cache_key`]) to the
//! metadata of the repository cloned at `base/<key>`. It is stored as JSON in
//! `<home>/cache.json`:
//!
//! ```json
//! { "github.com/org/repo": { "repo": "git@github.com:org/repo.git" } }
//! ```
//!
//! # Cache Strategy
//! - **Lazy load**: the file is read on first access and held for the invocation
//! - **Staged writes**: [`RepoIndex::set`] only touches memory, [`RepoIndex::dump`] persists
//! - **Write then rename**: a dump never leaves a half-written `cache.json`
//!
//! There is no locking; two projj processes dumping at once may lose an update.

use crate::core::error::{ProjjError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub repo: String,

    /// Fields written by other tools, preserved on dump
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndexEntry {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            extra: Map::new(),
        }
    }
}

pub type IndexEntries = BTreeMap<String, IndexEntry>;

#[derive(Debug)]
pub struct RepoIndex {
    path: PathBuf,
    entries: Option<IndexEntries>,
}

impl RepoIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk on first call, then serve it from memory.
    pub fn entries(&mut self) -> Result<&IndexEntries> {
        Ok(self.loaded()?)
    }

    pub fn contains(&mut self, key: &str) -> Result<bool> {
        Ok(self.loaded()?.contains_key(key))
    }

    pub fn get(&mut self, key: &str) -> Result<Option<&IndexEntry>> {
        Ok(self.loaded()?.get(key))
    }

    /// Stage an upsert in memory; call [`RepoIndex::dump`] to persist it.
    pub fn set(&mut self, key: impl Into<String>, entry: IndexEntry) -> Result<()> {
        self.loaded()?.insert(key.into(), entry);
        Ok(())
    }

    /// Overwrite the index file with the in-memory state.
    pub fn dump(&mut self) -> Result<()> {
        let path = self.path.clone();
        let entries = self.loaded()?;

        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ProjjError::index_write_failed(parent, e))?;
        }

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| {
            log::error!("Failed to write index file '{}': {}", staging.display(), e);
            ProjjError::index_write_failed(&staging, e)
        })?;
        fs::rename(&staging, &path).map_err(|e| ProjjError::index_write_failed(&path, e))?;

        log::debug!("Dumped {} index entries to {}", entries.len(), path.display());
        Ok(())
    }

    fn loaded(&mut self) -> Result<&mut IndexEntries> {
        if self.entries.is_none() {
            self.entries = Some(load_entries(&self.path)?);
        }
        Ok(self.entries.get_or_insert_with(BTreeMap::new))
    }
}

fn load_entries(path: &Path) -> Result<IndexEntries> {
    if !path.exists() {
        log::debug!("Index file does not exist, starting empty: {}", path.display());
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        log::error!("Failed to read index file '{}': {}", path.display(), e);
        ProjjError::index_read_failed(path, e)
    })?;

    let entries: IndexEntries =
        serde_json::from_str(&content).map_err(|e| ProjjError::index_parse_failed(path, e))?;
    log::debug!("Loaded {} index entries from {}", entries.len(), path.display());
    Ok(entries)
}

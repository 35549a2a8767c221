use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
};

/// Key–value collaborator holding the single persisted number.
pub trait PersonalBestStore: Send + Sync {
    fn load(&self) -> Result<u32>;
    fn save(&self, hits: u32) -> Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedBest {
    personal_best_hits: u32,
}

/// Stores the personal best as a small JSON document.
pub struct JsonBestStore {
    path: PathBuf,
    data: RwLock<PersistedBest>,
}

impl JsonBestStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read personal best from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable personal best in {}: {}", path.display(), err);
                PersistedBest::default()
            })
        } else {
            PersistedBest::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn persist(&self, data: &PersistedBest) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write personal best to {}", self.path.display()))
    }
}

impl PersonalBestStore for JsonBestStore {
    fn load(&self) -> Result<u32> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.personal_best_hits)
    }

    fn save(&self, hits: u32) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        guard.personal_best_hits = hits;
        self.persist(&guard)
    }
}

/// In-process store for tests and `--ephemeral` runs.
#[derive(Default)]
pub struct MemoryBestStore {
    hits: RwLock<u32>,
    saves: RwLock<u32>,
}

impl MemoryBestStore {
    pub fn with_best(hits: u32) -> Self {
        Self {
            hits: RwLock::new(hits),
            saves: RwLock::new(0),
        }
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> u32 {
        *self.saves.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersonalBestStore for MemoryBestStore {
    fn load(&self) -> Result<u32> {
        Ok(*self.hits.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn save(&self, hits: u32) -> Result<()> {
        *self.hits.write().unwrap_or_else(PoisonError::into_inner) = hits;
        *self.saves.write().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonBestStore::new(dir.path().join("personal_best.json")).unwrap();
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn saved_best_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("personal_best.json");

        let store = JsonBestStore::new(path.clone()).unwrap();
        store.save(13).unwrap();

        let reopened = JsonBestStore::new(path.clone()).unwrap();
        assert_eq!(reopened.load().unwrap(), 13);

        let raw = fs::read_to_string(path).unwrap();
        assert!(raw.contains("personalBestHits"));
    }

    #[test]
    fn corrupt_file_is_treated_as_no_best() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personal_best.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonBestStore::new(path).unwrap();
        assert_eq!(store.load().unwrap(), 0);
    }
}

// Manages the durable local store for the planning board.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to PlanItem or its nested types require incrementing
// PLANNER_STORAGE_VERSION below to prevent data corruption.
use crate::context::AppContext;
use crate::model::PlanItem;
use anyhow::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use thiserror::Error;

// Increment this when making breaking changes to the PlanItem serialization
// format. Version history:
// - v1: Initial format (kind/status tags, parent_id, timestamps)
const PLANNER_STORAGE_VERSION: u32 = 1;

/// Wrapper struct for the versioned on-disk document.
#[derive(Serialize, Deserialize)]
struct PlannerStorageData {
    #[serde(default)]
    version: u32,
    items: Vec<PlanItem>,
}

/// Tracks whether the last load succeeded for each backing file.
/// Blocks saves after a failed load so unreadable data is never
/// overwritten with an empty collection.
static LOAD_STATE_MAP: OnceLock<Mutex<HashMap<PathBuf, LoadState>>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Uninitialized,
    Success,
    Failed,
}

impl LoadState {
    fn get(path: &Path) -> LoadState {
        let map = LOAD_STATE_MAP.get_or_init(|| Mutex::new(HashMap::new()));
        *map.lock()
            .unwrap()
            .get(path)
            .unwrap_or(&LoadState::Uninitialized)
    }

    fn set(path: &Path, state: LoadState) {
        let map = LOAD_STATE_MAP.get_or_init(|| Mutex::new(HashMap::new()));
        map.lock().unwrap().insert(path.to_path_buf(), state);
    }
}

/// Why an import was rejected. The caller's collection is left untouched
/// in every case.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import rejected: top-level JSON value is not an array")]
    NotAnArray,
    #[error("import rejected: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` under an exclusive advisory lock on a sidecar lock file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: write to a .tmp file then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<Vec<PlanItem>> {
        if !path.exists() {
            LoadState::set(path, LoadState::Success);
            return Ok(vec![]);
        }
        let result = Self::with_lock(path, || {
            let json = fs::read_to_string(path)?;
            let data: PlannerStorageData = serde_json::from_str(&json)?;
            if data.version == PLANNER_STORAGE_VERSION {
                Ok(data.items)
            } else {
                Self::migrate_to_current(data.version, &json)
            }
        });

        match &result {
            Ok(_) => LoadState::set(path, LoadState::Success),
            Err(_) => LoadState::set(path, LoadState::Failed),
        }
        result
    }

    fn save_to_path(path: &Path, items: &[PlanItem]) -> Result<()> {
        if !Self::can_save_path(path) {
            return Err(anyhow::anyhow!(
                "Cannot save {}: previous load failed. This prevents overwriting data that couldn't be read.",
                path.display()
            ));
        }
        Self::with_lock(path, || {
            let data = PlannerStorageData {
                version: PLANNER_STORAGE_VERSION,
                items: items.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(path, json)?;
            Ok(())
        })
    }

    /// Run migrations to upgrade an old document to the current version.
    /// v0 never shipped; the match is the template future versions extend.
    fn migrate_to_current(old_version: u32, json: &str) -> Result<Vec<PlanItem>> {
        log::info!(
            "Migrating planner storage from v{} to v{}",
            old_version,
            PLANNER_STORAGE_VERSION
        );

        if old_version > PLANNER_STORAGE_VERSION {
            return Err(anyhow::anyhow!(
                "Planner storage version {} is newer than supported version {}. Please upgrade scoutdesk.",
                old_version,
                PLANNER_STORAGE_VERSION
            ));
        }

        let items = match old_version {
            0 | 1 => {
                let data: PlannerStorageData = serde_json::from_str(json)?;
                data.items
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown planner storage version: {}",
                    old_version
                ));
            }
        };

        Ok(items)
    }

    /// Load the board from planner.json.
    ///
    /// # Load State Tracking
    /// Never silently ignore errors from this function: a failure means
    /// corruption, a version mismatch, or a filesystem problem, and
    /// `save` is blocked until a load succeeds (or `force_save` is used).
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<PlanItem>> {
        match ctx.get_planner_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(vec![]),
        }
    }

    /// Save the board to planner.json.
    ///
    /// # Data Loss Prevention
    /// Checks the load state first. If the last `load()` failed, this
    /// returns an error instead of overwriting the file; use
    /// `force_save()` after manual recovery.
    pub fn save(ctx: &dyn AppContext, items: &[PlanItem]) -> Result<()> {
        match ctx.get_planner_path() {
            Some(path) => Self::save_to_path(&path, items),
            None => Err(anyhow::anyhow!("No planner storage path available")),
        }
    }

    /// Save bypassing the load-state check. Only for recovery paths where
    /// the caller has verified the data is what they want on disk.
    pub fn force_save(ctx: &dyn AppContext, items: &[PlanItem]) -> Result<()> {
        if let Some(path) = ctx.get_planner_path() {
            Self::with_lock(&path, || {
                let data = PlannerStorageData {
                    version: PLANNER_STORAGE_VERSION,
                    items: items.to_vec(),
                };
                let json = serde_json::to_string_pretty(&data)?;
                Self::atomic_write(&path, json)?;
                Ok(())
            })?;
        }
        Ok(())
    }

    /// True when saving is allowed: the last load succeeded, or no load
    /// has been attempted yet.
    pub fn can_save(ctx: &dyn AppContext) -> bool {
        match ctx.get_planner_path() {
            Some(path) => Self::can_save_path(&path),
            None => false,
        }
    }

    fn can_save_path(path: &Path) -> bool {
        match LoadState::get(path) {
            LoadState::Uninitialized => true,
            LoadState::Success => true,
            LoadState::Failed => false,
        }
    }

    // --- EXPORT / IMPORT (interchange format: a plain JSON array) ---

    /// Serializes the collection the way the board exports it: a
    /// pretty-printed JSON array, without the versioned wrapper.
    pub fn export_string(items: &[PlanItem]) -> Result<String> {
        Ok(serde_json::to_string_pretty(items)?)
    }

    /// Parses exported/uploaded text. Anything whose top-level value is
    /// not an array is rejected; a malformed element rejects the whole
    /// document rather than importing a prefix.
    pub fn import_from_str(content: &str) -> Result<Vec<PlanItem>, ImportError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_array() {
            return Err(ImportError::NotAnArray);
        }
        let items: Vec<PlanItem> = serde_json::from_value(value)?;
        Ok(items)
    }

    /// Merges imported items into an existing collection: items with a
    /// matching id replace the existing entry, the rest are appended.
    /// Returns the merged collection and the number of imported items.
    pub fn merge_import(existing: &[PlanItem], imported: Vec<PlanItem>) -> (Vec<PlanItem>, usize) {
        let mut merged = existing.to_vec();
        let count = imported.len();
        for item in imported {
            if let Some(idx) = merged.iter().position(|i| i.id == item.id) {
                merged[idx] = item;
            } else {
                merged.push(item);
            }
        }
        (merged, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use crate::model::{ItemKind, PlanItem};

    fn item(title: &str) -> PlanItem {
        PlanItem::new(ItemKind::Video, title, None)
    }

    #[test]
    fn test_atomic_write_and_load() {
        let ctx = TestContext::new();
        let items = vec![item("Edit intro"), item("Script episode 2")];

        LocalStorage::save(&ctx, &items).unwrap();
        let loaded = LocalStorage::load(&ctx).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "Edit intro");
        assert_eq!(loaded[1].title, "Script episode 2");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let ctx = TestContext::new();
        let loaded = LocalStorage::load(&ctx).unwrap();
        assert!(loaded.is_empty());
        assert!(LocalStorage::can_save(&ctx));
    }

    #[test]
    fn test_future_version_is_refused() {
        let ctx = TestContext::new();
        let path = ctx.get_planner_path().unwrap();
        let doc = format!(
            r#"{{"version": {}, "items": []}}"#,
            PLANNER_STORAGE_VERSION + 1
        );
        LocalStorage::atomic_write(&path, doc).unwrap();

        let result = LocalStorage::load(&ctx);
        assert!(result.is_err());
        assert!(!LocalStorage::can_save(&ctx));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = LocalStorage::import_from_str(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray));
    }

    #[test]
    fn test_merge_import_replaces_by_id() {
        let mut a = item("Old title");
        a.id = "fixed-id".to_string();
        let mut b = item("New title");
        b.id = "fixed-id".to_string();

        let (merged, count) = LocalStorage::merge_import(&[a], vec![b, item("Fresh")]);
        assert_eq!(count, 2);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "New title");
    }
}

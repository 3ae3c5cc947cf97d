use std::fs;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

use crate::model::ContentItem;
use crate::persist::Snapshot;

/// Key names on the durable surface. Fixed wire vocabulary.
const STATE_KEY: &str = "state.json";
const AVATAR_KEY: &str = "profile_photo";
const LIKED_KEY: &str = "liked.json";

/// Errors from the durable medium.
///
/// Callers log these and carry on; a failed write never invalidates the
/// in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize stored value: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// Reads and writes serialized state on a durable key-value surface.
///
/// `load*` methods tolerate a missing, empty, or malformed stored value
/// by returning `None` (never erroring), so first-run and corrupted
/// storage both fall back safely to default state.
pub trait PersistenceAdapter: Send + Sync {
    fn load(&self) -> Option<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;

    /// Dedicated fast-path key for the avatar payload.
    ///
    /// Stored separately from the main snapshot so the avatar survives
    /// even when the snapshot write is large or the stored document is
    /// corrupted. On startup this value overrides the embedded one.
    fn load_avatar(&self) -> Option<String>;
    fn save_avatar(&self, photo: &str) -> Result<(), StorageError>;

    /// Dedicated double-write of the liked gallery, mirroring the avatar
    /// fast path. Reconciled with the main snapshot at startup.
    fn load_liked(&self) -> Option<Vec<ContentItem>>;
    fn save_liked(&self, items: &[ContentItem]) -> Result<(), StorageError>;
}

/// File-backed adapter: one document per key under a storage directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create an adapter rooted at `dir`, creating the directory when
    /// missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Write {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    fn read_key(&self, key: &str) -> Option<String> {
        let path = self.dir.join(key);
        match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => Some(contents),
            Ok(_) => None,
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read stored value");
                None
            }
        }
    }

    /// Write through a temp file + rename so an interrupted write never
    /// truncates the previous value.
    fn write_key(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        let path = self.dir.join(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        fs::write(&tmp, contents).map_err(|e| StorageError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::Write { path, source: e })
    }
}

impl PersistenceAdapter for FileStore {
    fn load(&self) -> Option<Snapshot> {
        let raw = self.read_key(STATE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Stored snapshot is malformed, falling back to defaults");
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let raw = serde_json::to_string(snapshot)?;
        self.write_key(STATE_KEY, &raw)
    }

    fn load_avatar(&self) -> Option<String> {
        self.read_key(AVATAR_KEY)
    }

    fn save_avatar(&self, photo: &str) -> Result<(), StorageError> {
        self.write_key(AVATAR_KEY, photo)
    }

    fn load_liked(&self) -> Option<Vec<ContentItem>> {
        let raw = self.read_key(LIKED_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(error = %e, "Stored liked gallery is malformed, ignoring");
                None
            }
        }
    }

    fn save_liked(&self, items: &[ContentItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.write_key(LIKED_KEY, &raw)
    }
}

/// In-memory adapter for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    snapshot: Option<Snapshot>,
    avatar: Option<String>,
    liked: Option<Vec<ContentItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        self.inner.lock().snapshot.clone()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        self.inner.lock().snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn load_avatar(&self) -> Option<String> {
        self.inner.lock().avatar.clone()
    }

    fn save_avatar(&self, photo: &str) -> Result<(), StorageError> {
        self.inner.lock().avatar = Some(photo.to_string());
        Ok(())
    }

    fn load_liked(&self) -> Option<Vec<ContentItem>> {
        self.inner.lock().liked.clone()
    }

    fn save_liked(&self, items: &[ContentItem]) -> Result<(), StorageError> {
        self.inner.lock().liked = Some(items.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Theme;

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn first_run_is_absent() {
        let (_dir, store) = store();
        assert!(store.load().is_none());
        assert!(store.load_avatar().is_none());
        assert!(store.load_liked().is_none());
    }

    #[test]
    fn snapshot_round_trips() {
        let (_dir, store) = store();
        let mut snapshot = Snapshot::default();
        snapshot.theme = Theme::Dark;
        snapshot.total_posts = 3;
        snapshot.saved_memes = vec!["a".to_string(), "b".to_string()];

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn malformed_snapshot_is_absent() {
        let (dir, store) = store();
        fs::write(dir.path().join(STATE_KEY), "{this is not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn empty_snapshot_file_is_absent() {
        let (dir, store) = store();
        fs::write(dir.path().join(STATE_KEY), "  \n").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn avatar_survives_corrupted_snapshot() {
        let (dir, store) = store();
        store.save_avatar("data:image/png;base64,abc").unwrap();
        fs::write(dir.path().join(STATE_KEY), "garbage").unwrap();

        assert!(store.load().is_none());
        assert_eq!(store.load_avatar().unwrap(), "data:image/png;base64,abc");
    }

    #[test]
    fn liked_record_round_trips() {
        let (_dir, store) = store();
        let items = vec![ContentItem {
            id: "m1".to_string(),
            name: "One".to_string(),
            url: "https://img/1.jpg".to_string(),
            origin: crate::model::Origin::Remote,
            box_count: None,
            timestamp: None,
            owner: None,
        }];
        store.save_liked(&items).unwrap();
        assert_eq!(store.load_liked().unwrap(), items);
    }

    #[test]
    fn save_replaces_previous_value() {
        let (_dir, store) = store();
        let mut snapshot = Snapshot::default();
        snapshot.total_posts = 1;
        store.save(&snapshot).unwrap();
        snapshot.total_posts = 2;
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap().total_posts, 2);
    }
}

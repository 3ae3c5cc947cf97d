//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use memehub::model::{ContentItem, Origin};
use memehub::persist::{MemoryStore, PersistenceAdapter, Snapshot, StorageError};

/// Build a remote content item with the given id and name.
pub fn remote_item(id: &str, name: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("https://img.example/{id}.jpg"),
        origin: Origin::Remote,
        box_count: None,
        timestamp: None,
        owner: None,
    }
}

/// A small browsable list for fetch/commit tests.
pub fn sample_listing() -> Vec<ContentItem> {
    vec![
        remote_item("m1", "One Does Not Simply"),
        remote_item("m2", "Distracted Boyfriend"),
        remote_item("m3", "Two Buttons"),
    ]
}

/// Adapter whose writes can be made to fail, for exercising the
/// log-and-swallow policy. Reads delegate to an inner [`MemoryStore`].
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    write_attempts: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: "quota".into(),
                source: io::Error::other("quota exceeded"),
            });
        }
        Ok(())
    }
}

impl PersistenceAdapter for FailingStore {
    fn load(&self) -> Option<Snapshot> {
        self.inner.load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        self.check()?;
        self.inner.save(snapshot)
    }

    fn load_avatar(&self) -> Option<String> {
        self.inner.load_avatar()
    }

    fn save_avatar(&self, photo: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.save_avatar(photo)
    }

    fn load_liked(&self) -> Option<Vec<ContentItem>> {
        self.inner.load_liked()
    }

    fn save_liked(&self, items: &[ContentItem]) -> Result<(), StorageError> {
        self.check()?;
        self.inner.save_liked(items)
    }
}

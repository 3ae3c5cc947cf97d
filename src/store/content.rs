//! Canonical content lists: the browsable set and the user's uploads.

use chrono::Utc;
use uuid::Uuid;

use crate::model::{ContentItem, Origin, UserProfile};
use crate::store::intent::{IntentError, UploadRequest};

/// Owns the fetched browsable list and the uploaded collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStore {
    browsable: Vec<ContentItem>,
    uploaded: Vec<ContentItem>,
    /// Uploads ever made, monotonic (items are never removed here).
    total_posts: u64,
}

impl ContentStore {
    /// Rebuild from persisted lists and the stored post counter.
    pub fn from_parts(
        browsable: Vec<ContentItem>,
        uploaded: Vec<ContentItem>,
        total_posts: u64,
    ) -> Self {
        Self {
            browsable,
            uploaded,
            total_posts,
        }
    }

    /// Install a fetch result as the full browsable set.
    ///
    /// Overwrite, not merge: a fetch replaces whatever was there before.
    pub fn replace_all(&mut self, items: Vec<ContentItem>) {
        self.browsable = items;
    }

    /// Create an uploaded item: stamps a fresh identity and timestamp,
    /// attaches the current profile's owner snapshot, and prepends to the
    /// uploaded collection (most recent first).
    pub fn add_uploaded(
        &mut self,
        request: UploadRequest,
        profile: &UserProfile,
    ) -> Result<&ContentItem, IntentError> {
        if request.url.trim().is_empty() {
            return Err(IntentError::MissingImage);
        }

        let item = ContentItem {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            url: request.url,
            origin: Origin::Uploaded,
            box_count: request.box_count,
            timestamp: Some(Utc::now()),
            owner: Some(profile.owner_snapshot()),
        };
        self.uploaded.insert(0, item);
        self.total_posts += 1;
        Ok(&self.uploaded[0])
    }

    /// Rewrite the embedded avatar on every uploaded item.
    ///
    /// Single pass so the composite update is atomic under the
    /// container's serialization.
    pub fn propagate_avatar(&mut self, photo: &str) {
        for item in &mut self.uploaded {
            if let Some(owner) = &mut item.owner {
                owner.profile_photo = photo.to_string();
            }
        }
    }

    /// Resolve an id against both lists (browsable first).
    pub fn find(&self, item_id: &str) -> Option<&ContentItem> {
        self.browsable
            .iter()
            .chain(self.uploaded.iter())
            .find(|item| item.id == item_id)
    }

    pub fn browsable(&self) -> &[ContentItem] {
        &self.browsable
    }

    pub fn uploaded(&self) -> &[ContentItem] {
        &self.uploaded
    }

    pub fn total_posts(&self) -> u64 {
        self.total_posts
    }
}

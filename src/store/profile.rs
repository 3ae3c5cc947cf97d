//! Profile mutation semantics and the personal liked gallery.

use crate::model::{ContentItem, UserProfile};
use crate::store::intent::ProfileUpdate;

/// Shallow-merge optional profile fields into the profile.
///
/// Returns the new avatar value when the update carried one, so the
/// caller can run avatar propagation and the fast-path write.
pub fn merge_profile(profile: &mut UserProfile, update: ProfileUpdate) -> Option<String> {
    if let Some(name) = update.name {
        profile.name = name;
    }
    if let Some(username) = update.username {
        profile.username = username;
    }
    if let Some(bio) = update.bio {
        profile.bio = bio;
    }
    match update.profile_photo {
        Some(photo) => {
            profile.profile_photo = photo.clone();
            Some(photo)
        }
        None => None,
    }
}

/// The current user's liked items, rendered as a personal gallery.
///
/// Membership is per identity: an id appears at most once no matter how
/// many times it is liked. This is *this user's* like membership, not a
/// global like count — counts live in the interaction ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedGallery {
    items: Vec<ContentItem>,
}

impl LikedGallery {
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    /// Idempotent add; returns whether the gallery changed.
    pub fn insert(&mut self, item: ContentItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Wholesale replacement (set-liked-items intent, startup reconcile).
    pub fn replace(&mut self, items: Vec<ContentItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

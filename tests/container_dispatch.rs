mod common;

use std::sync::Arc;

use common::{remote_item, sample_listing, FailingStore};
use memehub::model::Theme;
use memehub::persist::{MemoryStore, PersistenceAdapter};
use memehub::store::{Intent, IntentError, ProfileUpdate, StateContainer, UploadRequest};

fn container_with_listing() -> StateContainer {
    let container = StateContainer::new(Box::new(MemoryStore::new()));
    container
        .dispatch(Intent::ContentFetched {
            items: sample_listing(),
        })
        .unwrap();
    container
}

#[test]
fn like_compounds_count_but_not_gallery() {
    let container = container_with_listing();
    for _ in 0..2 {
        container
            .dispatch(Intent::Like {
                item_id: "m1".to_string(),
            })
            .unwrap();
    }

    let state = container.snapshot();
    assert_eq!(state.ledger.likes("m1"), 2);
    assert_eq!(state.liked.len(), 1);
    assert_eq!(state.liked.items()[0].id, "m1");
}

#[test]
fn empty_comment_is_refused_and_state_untouched() {
    let container = container_with_listing();
    let before = container.snapshot();

    let result = container.dispatch(Intent::AddComment {
        item_id: "m1".to_string(),
        text: "   ".to_string(),
    });

    assert_eq!(result, Err(IntentError::EmptyComment));
    assert_eq!(container.snapshot(), before);
}

#[test]
fn comment_counters_track_adds_and_deletes() {
    let container = container_with_listing();
    for text in ["first", "second"] {
        container
            .dispatch(Intent::AddComment {
                item_id: "m1".to_string(),
                text: text.to_string(),
            })
            .unwrap();
    }
    container
        .dispatch(Intent::DeleteComment {
            item_id: "m1".to_string(),
            index: 0,
        })
        .unwrap();

    let state = container.snapshot();
    assert_eq!(state.ledger.comments("m1"), ["second"]);
    assert_eq!(state.ledger.total_comments(), 1);
}

#[test]
fn out_of_range_delete_does_not_notify_subscribers() {
    let container = container_with_listing();
    let rx = container.subscribe();
    let before = *rx.borrow();

    container
        .dispatch(Intent::DeleteComment {
            item_id: "m1".to_string(),
            index: 99,
        })
        .unwrap();

    assert_eq!(*rx.borrow(), before);
}

#[test]
fn subscribers_see_a_revision_per_committed_change() {
    let container = container_with_listing();
    let rx = container.subscribe();
    let before = *rx.borrow();

    container
        .dispatch(Intent::Like {
            item_id: "m1".to_string(),
        })
        .unwrap();
    container.dispatch(Intent::ToggleTheme).unwrap();

    assert_eq!(*rx.borrow(), before + 2);
}

#[test]
fn avatar_update_hits_fast_path_and_uploads() {
    let adapter = Arc::new(FailingStore::new());
    let container = StateContainer::new(Box::new(SharedAdapter(adapter.clone())));

    container
        .dispatch(Intent::AddUpload(UploadRequest {
            name: "mine".to_string(),
            url: "data:image/png;base64,x".to_string(),
            box_count: None,
        }))
        .unwrap();
    container
        .dispatch(Intent::UpdateProfile(ProfileUpdate {
            profile_photo: Some("data:new-avatar".to_string()),
            ..Default::default()
        }))
        .unwrap();

    // The dedicated key saw the write.
    assert_eq!(adapter.load_avatar().as_deref(), Some("data:new-avatar"));

    // And the denormalized owner snapshot on the upload did too.
    let state = container.snapshot();
    assert_eq!(
        state.content.uploaded()[0]
            .owner
            .as_ref()
            .unwrap()
            .profile_photo,
        "data:new-avatar"
    );
}

#[test]
fn storage_failure_is_swallowed_and_state_advances() {
    let adapter = Arc::new(FailingStore::new());
    let container = StateContainer::new(Box::new(SharedAdapter(adapter.clone())));
    adapter.fail_writes(true);

    let result = container.dispatch(Intent::SetTheme(Theme::Dark));

    assert_eq!(result, Ok(()));
    assert_eq!(container.snapshot().theme, Theme::Dark);
    assert!(adapter.write_attempts() > 0);
}

#[test]
fn like_of_unresolvable_id_counts_without_gallery_entry() {
    let container = StateContainer::new(Box::new(MemoryStore::new()));
    container
        .dispatch(Intent::Like {
            item_id: "ghost".to_string(),
        })
        .unwrap();

    let state = container.snapshot();
    assert_eq!(state.ledger.likes("ghost"), 1);
    assert!(state.liked.is_empty());
}

#[test]
fn liking_an_upload_fills_the_gallery() {
    let container = StateContainer::new(Box::new(MemoryStore::new()));
    container
        .dispatch(Intent::AddUpload(UploadRequest {
            name: "mine".to_string(),
            url: "data:image/png;base64,x".to_string(),
            box_count: None,
        }))
        .unwrap();
    let id = container.snapshot().content.uploaded()[0].id.clone();

    container.dispatch(Intent::Like { item_id: id }).unwrap();
    assert_eq!(container.snapshot().liked.len(), 1);
}

#[test]
fn set_liked_items_replaces_wholesale() {
    let container = container_with_listing();
    container
        .dispatch(Intent::SetLikedItems(vec![remote_item("m9", "Other")]))
        .unwrap();

    let state = container.snapshot();
    assert_eq!(state.liked.len(), 1);
    assert!(state.liked.contains("m9"));
}

/// Lets a test keep a handle on the adapter the container owns.
struct SharedAdapter(Arc<FailingStore>);

impl PersistenceAdapter for SharedAdapter {
    fn load(&self) -> Option<memehub::persist::Snapshot> {
        self.0.load()
    }
    fn save(&self, snapshot: &memehub::persist::Snapshot) -> Result<(), memehub::persist::StorageError> {
        self.0.save(snapshot)
    }
    fn load_avatar(&self) -> Option<String> {
        self.0.load_avatar()
    }
    fn save_avatar(&self, photo: &str) -> Result<(), memehub::persist::StorageError> {
        self.0.save_avatar(photo)
    }
    fn load_liked(&self) -> Option<Vec<memehub::model::ContentItem>> {
        self.0.load_liked()
    }
    fn save_liked(
        &self,
        items: &[memehub::model::ContentItem],
    ) -> Result<(), memehub::persist::StorageError> {
        self.0.save_liked(items)
    }
}

//! The intent vocabulary: every mutation the engine accepts.

use thiserror::Error;

use crate::model::{ContentItem, FetchKind, Theme};

/// Validation failures surfaced at the intent boundary.
///
/// These are refusals, not crashes: dispatch returns them to the caller
/// and state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("Comment text must not be empty")]
    EmptyComment,

    #[error("An upload needs an image URL")]
    MissingImage,
}

/// Payload for the add-uploaded-item intent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadRequest {
    pub name: String,
    pub url: String,
    pub box_count: Option<u32>,
}

/// Partial profile fields for the update-profile intent.
///
/// `None` fields are left unchanged (shallow merge).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
}

/// User actions and system events dispatched through the container.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetTheme(Theme),
    ToggleTheme,
    Like {
        item_id: String,
    },
    AddComment {
        item_id: String,
        text: String,
    },
    DeleteComment {
        item_id: String,
        index: usize,
    },
    AddUpload(UploadRequest),
    UpdateProfile(ProfileUpdate),
    /// Wholesale replacement of the liked gallery (startup reconcile).
    SetLikedItems(Vec<ContentItem>),
    SaveItem {
        item_id: String,
    },
    UnsaveItem {
        item_id: String,
    },
    /// A remote request was issued; preempts the previous status.
    FetchStarted {
        kind: FetchKind,
    },
    /// Latest content-listing result, committed by the container.
    ContentFetched {
        items: Vec<ContentItem>,
    },
    /// Latest template-listing result, committed by the container.
    TemplatesFetched {
        names: Vec<String>,
    },
    /// A remote request failed.
    FetchFailed {
        kind: FetchKind,
        reason: String,
    },
}

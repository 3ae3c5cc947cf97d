use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ContentItem, InteractionRecord, Theme, UserProfile};

/// Complete serialized representation of application state at a point in
/// time.
///
/// Field names are fixed wire vocabulary — snapshots written by earlier
/// versions must keep loading, so do not rename them. `loading` and
/// `error` are transient and reset on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub user: UserProfile,
    pub theme: Theme,
    /// The browsable content list, in fetch order.
    pub memes: Vec<ContentItem>,
    /// User uploads, most recent first.
    pub uploaded_memes: Vec<ContentItem>,
    /// Interaction records keyed by content-item id.
    pub interactions: BTreeMap<String, InteractionRecord>,
    /// The personal liked gallery.
    pub liked_memes: Vec<ContentItem>,
    /// Bookmarked item ids, in save order.
    pub saved_memes: Vec<String>,
    pub total_posts: u64,
    pub liked_posts: u64,
    pub total_comments: u64,
    /// Transient: whether a fetch was in flight when the snapshot was
    /// taken.
    pub loading: bool,
    /// Transient: last fetch failure, if any.
    pub error: Option<String>,
}

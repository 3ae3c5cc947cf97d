//! Core data types shared across the engine.
//!
//! Everything here is plain data: serde-serializable, cloneable, free of
//! behavior beyond small constructors. Mutation semantics live in the
//! store layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a content item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Fetched from the remote content listing.
    #[default]
    Remote,
    /// Created locally through an upload intent.
    Uploaded,
}

/// Denormalized snapshot of the owning user, embedded in uploaded items.
///
/// This is a cached projection of the profile at upload time, not a
/// back-reference: when the profile photo changes, the content store
/// rewrites this snapshot on every uploaded item in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSnapshot {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub profile_photo: String,
}

/// A single shareable unit of media plus metadata.
///
/// Immutable once created, except for the embedded [`OwnerSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Opaque stable identity. Remote items keep the provider's id;
    /// uploads get a fresh UUID.
    pub id: String,
    /// Display name / caption.
    pub name: String,
    /// Source image URL (a data URL for uploads).
    pub url: String,
    #[serde(default)]
    pub origin: Origin,
    /// Number of text boxes in the template, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_count: Option<u32>,
    /// Creation time. Remote items carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Owning-user snapshot; only present on uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerSnapshot>,
}

/// Like count and comment list associated with one content item.
///
/// A missing record and a zero record are observably equivalent; the
/// ledger materializes records lazily on first write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InteractionRecord {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// The single user profile of this engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub bio: String,
    /// Avatar reference; may be a large inline data-URL payload.
    /// Empty string means unset.
    #[serde(default)]
    pub profile_photo: String,
}

impl UserProfile {
    /// The denormalized projection embedded in uploaded items.
    pub fn owner_snapshot(&self) -> OwnerSnapshot {
        OwnerSnapshot {
            name: self.name.clone(),
            username: self.username.clone(),
            profile_photo: self.profile_photo.clone(),
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            username: "anonymous".to_string(),
            bio: String::new(),
            profile_photo: String::new(),
        }
    }
}

/// UI theme; persisted so it survives restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The two remote operation kinds the engine issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Content,
    Templates,
}

/// Lifecycle of one remote operation kind.
///
/// Exactly one status per kind at a time; a new request preempts the
/// previous status rather than queueing behind it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl FetchStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchStatus::Pending)
    }

    /// The failure reason, when the last request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

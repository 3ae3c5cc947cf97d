//! The composite application state and its snapshot mapping.

use crate::model::{FetchKind, FetchStatus, Theme, UserProfile};
use crate::persist::Snapshot;
use crate::store::content::ContentStore;
use crate::store::ledger::InteractionLedger;
use crate::store::profile::LikedGallery;

/// Fetch lifecycle per remote operation kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    pub content: FetchStatus,
    pub templates: FetchStatus,
}

impl FetchState {
    pub fn status_mut(&mut self, kind: FetchKind) -> &mut FetchStatus {
        match kind {
            FetchKind::Content => &mut self.content,
            FetchKind::Templates => &mut self.templates,
        }
    }

    /// Whether any remote operation is in flight.
    pub fn any_pending(&self) -> bool {
        self.content.is_pending() || self.templates.is_pending()
    }

    /// First recorded failure reason, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.content.error().or_else(|| self.templates.error())
    }
}

/// Everything the engine holds in memory. Cloned wholesale for reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub profile: UserProfile,
    pub theme: Theme,
    pub content: ContentStore,
    pub ledger: InteractionLedger,
    pub liked: LikedGallery,
    /// Bookmarked item ids, in save order.
    pub saved: Vec<String>,
    /// Most recent template names; transient, never persisted.
    pub templates: Vec<String>,
    pub fetch: FetchState,
}

impl AppState {
    /// Serialize into the durable wire format.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            user: self.profile.clone(),
            theme: self.theme,
            memes: self.content.browsable().to_vec(),
            uploaded_memes: self.content.uploaded().to_vec(),
            interactions: self.ledger.records().clone(),
            liked_memes: self.liked.items().to_vec(),
            saved_memes: self.saved.clone(),
            total_posts: self.content.total_posts(),
            liked_posts: self.liked.len() as u64,
            total_comments: self.ledger.total_comments(),
            loading: self.fetch.any_pending(),
            error: self.fetch.first_error().map(str::to_string),
        }
    }

    /// Rebuild state from a restored snapshot.
    ///
    /// Transient fetch state resets to idle and the template list starts
    /// empty; everything else round-trips field for field.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            profile: snapshot.user,
            theme: snapshot.theme,
            content: ContentStore::from_parts(
                snapshot.memes,
                snapshot.uploaded_memes,
                snapshot.total_posts,
            ),
            ledger: InteractionLedger::from_parts(snapshot.interactions, snapshot.total_comments),
            liked: LikedGallery::from_items(snapshot.liked_memes),
            saved: snapshot.saved_memes,
            templates: Vec::new(),
            fetch: FetchState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentItem, Origin};

    #[test]
    fn snapshot_round_trips_modulo_transients() {
        let mut state = AppState::default();
        state.theme = Theme::Dark;
        state.content.replace_all(vec![ContentItem {
            id: "m1".to_string(),
            name: "One".to_string(),
            url: "https://img/1.jpg".to_string(),
            origin: Origin::Remote,
            box_count: Some(2),
            timestamp: None,
            owner: None,
        }]);
        state.ledger.like("m1");
        state.ledger.add_comment("m1", "nice").unwrap();
        state.saved.push("m1".to_string());
        // Transients that must not survive the trip.
        state.fetch.content = FetchStatus::Failed("boom".to_string());
        state.templates = vec!["Template".to_string()];

        let restored = AppState::from_snapshot(state.to_snapshot());

        assert_eq!(restored.theme, state.theme);
        assert_eq!(restored.content, state.content);
        assert_eq!(restored.ledger, state.ledger);
        assert_eq!(restored.saved, state.saved);
        assert_eq!(restored.fetch, FetchState::default());
        assert!(restored.templates.is_empty());
    }

    #[test]
    fn snapshot_reports_pending_as_loading() {
        let mut state = AppState::default();
        state.fetch.content = FetchStatus::Pending;
        assert!(state.to_snapshot().loading);

        state.fetch.content = FetchStatus::Succeeded;
        assert!(!state.to_snapshot().loading);
    }

    #[test]
    fn liked_posts_counter_tracks_gallery_size() {
        let mut state = AppState::default();
        state.liked.insert(ContentItem {
            id: "m1".to_string(),
            name: "One".to_string(),
            url: String::new(),
            origin: Origin::Remote,
            box_count: None,
            timestamp: None,
            owner: None,
        });
        assert_eq!(state.to_snapshot().liked_posts, 1);
    }
}

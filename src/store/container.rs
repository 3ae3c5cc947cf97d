//! The composition root: serialized dispatch, subscriptions, persistence,
//! and remote-fetch sequencing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use crate::model::{ContentItem, FetchKind};
use crate::persist::PersistenceAdapter;
use crate::remote::{NetworkError, RemoteFetcher};
use crate::store::intent::{Intent, IntentError};
use crate::store::reducer;
use crate::store::state::AppState;

/// The single serialization point for all mutations.
///
/// Mutations are applied one at a time behind a write lock, which stands
/// in for the single intent queue: two intents can never interleave
/// mid-mutation. Reads clone the current state and never block on
/// persistence — snapshots are taken under the lock, written after it is
/// released.
pub struct StateContainer {
    state: Arc<RwLock<AppState>>,
    adapter: Box<dyn PersistenceAdapter>,
    revision: watch::Sender<u64>,
    /// Latest issued sequence number per fetch kind. Only the response
    /// carrying the latest number is committed (last-write-wins); a
    /// superseded response is discarded on arrival, not cancelled.
    content_seq: AtomicU64,
    template_seq: AtomicU64,
}

impl StateContainer {
    /// Hydrate a container from the adapter, or start from defaults.
    ///
    /// Restoration order matters: the main snapshot first, then the
    /// dedicated avatar key overrides whatever the snapshot embedded,
    /// then the dedicated liked record fills an empty gallery.
    pub fn new(adapter: Box<dyn PersistenceAdapter>) -> Self {
        let mut state = match adapter.load() {
            Some(snapshot) => AppState::from_snapshot(snapshot),
            None => AppState::default(),
        };

        if let Some(photo) = adapter.load_avatar() {
            state.profile.profile_photo = photo;
        }

        if state.liked.is_empty() {
            if let Some(items) = adapter.load_liked() {
                if !items.is_empty() {
                    tracing::info!(
                        count = items.len(),
                        "Recovered liked gallery from its dedicated record"
                    );
                    state.liked.replace(items);
                }
            }
        }

        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(RwLock::new(state)),
            adapter,
            revision,
            content_seq: AtomicU64::new(0),
            template_seq: AtomicU64::new(0),
        }
    }

    /// Clone of the current state; callable concurrently with dispatches.
    pub fn snapshot(&self) -> AppState {
        self.state.read().expect("state lock poisoned").clone()
    }

    /// Subscribe to commit notifications.
    ///
    /// The value is a monotonically increasing revision; on change, read
    /// the state with [`StateContainer::snapshot`].
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Apply one intent.
    ///
    /// Validation failures are returned and leave state untouched.
    /// Storage failures are logged and swallowed — the in-memory state
    /// remains authoritative for the rest of the session.
    pub fn dispatch(&self, intent: Intent) -> Result<(), IntentError> {
        let (outcome, persisted, liked) = {
            let mut state = self.state.write().expect("state lock poisoned");
            let outcome = reducer::apply(&mut state, intent)?;
            if !outcome.changed {
                return Ok(());
            }
            let persisted = state.to_snapshot();
            let liked = outcome
                .liked_dirty
                .then(|| state.liked.items().to_vec());
            (outcome, persisted, liked)
        };

        self.revision.send_modify(|rev| *rev += 1);

        if let Some(photo) = &outcome.avatar {
            if let Err(e) = self.adapter.save_avatar(photo) {
                tracing::warn!(error = %e, "Avatar fast-path write failed");
            }
        }
        if let Some(items) = &liked {
            if let Err(e) = self.adapter.save_liked(items) {
                tracing::warn!(error = %e, "Liked-gallery write failed");
            }
        }
        if let Err(e) = self.adapter.save(&persisted) {
            tracing::warn!(error = %e, "Snapshot write failed; in-memory state stays authoritative");
        }

        Ok(())
    }

    /// Issue a content fetch: bumps the sequence number and flips the
    /// status to pending. The returned number must accompany the eventual
    /// result for it to be committed.
    pub fn begin_content_fetch(&self) -> u64 {
        let seq = self.content_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.dispatch(Intent::FetchStarted {
            kind: FetchKind::Content,
        });
        seq
    }

    /// Commit a content-fetch result.
    ///
    /// Returns false when the result was superseded by a later request
    /// and discarded.
    pub fn commit_content_result(
        &self,
        seq: u64,
        result: Result<Vec<ContentItem>, NetworkError>,
    ) -> bool {
        if seq != self.content_seq.load(Ordering::SeqCst) {
            tracing::debug!(seq, "Discarding stale content-fetch result");
            return false;
        }
        let intent = match result {
            Ok(items) => Intent::ContentFetched { items },
            Err(e) => Intent::FetchFailed {
                kind: FetchKind::Content,
                reason: e.to_string(),
            },
        };
        let _ = self.dispatch(intent);
        true
    }

    /// Issue a template fetch; see [`StateContainer::begin_content_fetch`].
    pub fn begin_template_fetch(&self) -> u64 {
        let seq = self.template_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.dispatch(Intent::FetchStarted {
            kind: FetchKind::Templates,
        });
        seq
    }

    /// Commit a template-fetch result; stale results are discarded.
    pub fn commit_template_result(
        &self,
        seq: u64,
        result: Result<Vec<String>, NetworkError>,
    ) -> bool {
        if seq != self.template_seq.load(Ordering::SeqCst) {
            tracing::debug!(seq, "Discarding stale template-fetch result");
            return false;
        }
        let intent = match result {
            Ok(names) => Intent::TemplatesFetched { names },
            Err(e) => Intent::FetchFailed {
                kind: FetchKind::Templates,
                reason: e.to_string(),
            },
        };
        let _ = self.dispatch(intent);
        true
    }

    /// Fetch the content list and commit it, unless superseded.
    ///
    /// Returns whether the result was committed.
    pub async fn fetch_content(&self, fetcher: &RemoteFetcher, query: Option<&str>) -> bool {
        let seq = self.begin_content_fetch();
        let result = fetcher.fetch_content_list(query).await;
        self.commit_content_result(seq, result)
    }

    /// Fetch template names and commit them, unless superseded.
    pub async fn fetch_templates(&self, fetcher: &RemoteFetcher, limit: usize) -> bool {
        let seq = self.begin_template_fetch();
        let result = fetcher.fetch_template_names(limit).await;
        self.commit_template_result(seq, result)
    }
}

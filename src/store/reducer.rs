//! The single mutation function: applies one intent to the state.

use crate::model::FetchStatus;
use crate::store::intent::{Intent, IntentError};
use crate::store::profile;
use crate::store::state::AppState;

/// What one applied intent did, beyond mutating state.
///
/// The container uses this to decide whether to notify subscribers and
/// which fast-path keys to rewrite.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Whether observable state changed; no-ops skip notify and persist.
    pub changed: bool,
    /// New avatar value, when this intent updated the profile photo.
    pub avatar: Option<String>,
    /// Whether the liked gallery changed and its double-write is due.
    pub liked_dirty: bool,
}

impl Outcome {
    fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }
}

/// Apply one intent to the state.
///
/// Validation failures leave state untouched and are returned to the
/// caller; nothing here panics or unwinds across the dispatcher.
pub fn apply(state: &mut AppState, intent: Intent) -> Result<Outcome, IntentError> {
    match intent {
        Intent::SetTheme(theme) => {
            if state.theme == theme {
                return Ok(Outcome::unchanged());
            }
            state.theme = theme;
            Ok(Outcome::changed())
        }

        Intent::ToggleTheme => {
            state.theme = state.theme.toggled();
            Ok(Outcome::changed())
        }

        Intent::Like { item_id } => {
            state.ledger.like(&item_id);
            // Gallery membership stays idempotent even though the count
            // keeps climbing.
            let mut outcome = Outcome::changed();
            if !state.liked.contains(&item_id) {
                if let Some(item) = state.content.find(&item_id).cloned() {
                    state.liked.insert(item);
                    outcome.liked_dirty = true;
                }
            }
            Ok(outcome)
        }

        Intent::AddComment { item_id, text } => {
            state.ledger.add_comment(&item_id, &text)?;
            Ok(Outcome::changed())
        }

        Intent::DeleteComment { item_id, index } => {
            if state.ledger.delete_comment(&item_id, index) {
                Ok(Outcome::changed())
            } else {
                Ok(Outcome::unchanged())
            }
        }

        Intent::AddUpload(request) => {
            let profile = state.profile.clone();
            state.content.add_uploaded(request, &profile)?;
            Ok(Outcome::changed())
        }

        Intent::UpdateProfile(update) => {
            let avatar = profile::merge_profile(&mut state.profile, update);
            if let Some(photo) = &avatar {
                state.content.propagate_avatar(photo);
            }
            Ok(Outcome {
                changed: true,
                avatar,
                liked_dirty: false,
            })
        }

        Intent::SetLikedItems(items) => {
            state.liked.replace(items);
            Ok(Outcome {
                changed: true,
                avatar: None,
                liked_dirty: true,
            })
        }

        Intent::SaveItem { item_id } => {
            if state.saved.iter().any(|id| *id == item_id) {
                return Ok(Outcome::unchanged());
            }
            state.saved.push(item_id);
            Ok(Outcome::changed())
        }

        Intent::UnsaveItem { item_id } => {
            let before = state.saved.len();
            state.saved.retain(|id| *id != item_id);
            if state.saved.len() == before {
                Ok(Outcome::unchanged())
            } else {
                Ok(Outcome::changed())
            }
        }

        Intent::FetchStarted { kind } => {
            *state.fetch.status_mut(kind) = FetchStatus::Pending;
            Ok(Outcome::changed())
        }

        Intent::ContentFetched { items } => {
            // Full replace; a successful fetch also clears any prior
            // failed-fetch error.
            state.content.replace_all(items);
            state.fetch.content = FetchStatus::Succeeded;
            Ok(Outcome::changed())
        }

        Intent::TemplatesFetched { names } => {
            state.templates = names;
            state.fetch.templates = FetchStatus::Succeeded;
            Ok(Outcome::changed())
        }

        Intent::FetchFailed { kind, reason } => {
            *state.fetch.status_mut(kind) = FetchStatus::Failed(reason);
            Ok(Outcome::changed())
        }
    }
}

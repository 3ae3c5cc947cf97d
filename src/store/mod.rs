//! The authoritative in-memory store and its serialized mutation path.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ StateContainer ──→ reducer ──→ AppState
//!               │                             │
//!               ├── watch subscribers ←───────┤
//!               └── PersistenceAdapter.save(snapshot)
//! ```
//!
//! All mutations flow through [`StateContainer::dispatch`], which applies
//! them one at a time and persists the result. Reads clone the current
//! state and never block on IO.

mod container;
mod content;
mod intent;
mod ledger;
mod profile;
mod reducer;
mod state;

pub use container::StateContainer;
pub use content::ContentStore;
pub use intent::{Intent, IntentError, ProfileUpdate, UploadRequest};
pub use ledger::InteractionLedger;
pub use profile::LikedGallery;
pub use reducer::{apply, Outcome};
pub use state::{AppState, FetchState};

//! Client-side state and persistence engine for a meme-sharing app.
//!
//! The engine owns the single authoritative in-memory store (content,
//! interactions, profile, fetch status), snapshots it to durable storage
//! after every committed change, and exposes pure projections for the UI
//! to render from.
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
//! - **Intents** are the only way to mutate; they are applied one at a
//!   time, so consumers never observe a half-applied change.
//! - **Projections** ([`views`]) are pure functions over a state clone.
//! - **Persistence** is best effort: a failed write is logged and the
//!   in-memory state stays authoritative.

pub mod config;
pub mod model;
pub mod persist;
pub mod remote;
pub mod store;
pub mod views;

//! Pure derived-view computations over a state snapshot.
//!
//! Nothing here mutates: every function takes snapshot data by reference
//! and returns a fresh list, so the UI can call them any number of times
//! with no ordering constraints.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::model::ContentItem;
use crate::store::InteractionLedger;

/// Browse categories offered by the explore surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Trending,
    New,
    Classic,
    Random,
}

impl Category {
    /// Parse a user-facing category label. Unknown labels return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trending" => Some(Self::Trending),
            "new" => Some(Self::New),
            "classic" => Some(Self::Classic),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Sort keys for the explore surface. All sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Likes,
    Date,
    Comments,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "likes" => Some(Self::Likes),
            "date" => Some(Self::Date),
            "comments" => Some(Self::Comments),
            _ => None,
        }
    }
}

/// How many items the category views return at most.
const CATEGORY_LIMIT: usize = 10;

/// Minimum box count for the Classic category; more text boxes reads as
/// the classic multi-panel format.
const CLASSIC_MIN_BOXES: u32 = 3;

/// Filter items by category.
///
/// `Trending` is the top 10 by like count descending, ties in original
/// order; `New` the last 10 in fetch order; `Classic` everything with at
/// least [`CLASSIC_MIN_BOXES`] text boxes; `Random` a shuffled 10-item
/// sample. Pass a `seed` for a reproducible shuffle (tests); with `None`
/// the shuffle draws from thread randomness and is non-deterministic.
pub fn by_category(
    items: &[ContentItem],
    ledger: &InteractionLedger,
    category: Category,
    seed: Option<u64>,
) -> Vec<ContentItem> {
    match category {
        Category::Trending => {
            let mut out = items.to_vec();
            out.sort_by(|a, b| ledger.likes(&b.id).cmp(&ledger.likes(&a.id)));
            out.truncate(CATEGORY_LIMIT);
            out
        }
        Category::New => {
            let skip = items.len().saturating_sub(CATEGORY_LIMIT);
            items[skip..].to_vec()
        }
        Category::Classic => items
            .iter()
            .filter(|item| item.box_count.is_some_and(|boxes| boxes >= CLASSIC_MIN_BOXES))
            .cloned()
            .collect(),
        Category::Random => {
            let mut out = items.to_vec();
            match seed {
                Some(seed) => out.shuffle(&mut StdRng::seed_from_u64(seed)),
                None => out.shuffle(&mut rand::rng()),
            }
            out.truncate(CATEGORY_LIMIT);
            out
        }
    }
}

/// Case-insensitive substring match on the display name; an empty term
/// matches everything.
pub fn search(items: &[ContentItem], term: &str) -> Vec<ContentItem> {
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Stable descending sort by the chosen key; equal keys preserve the
/// relative input order.
pub fn sort_by(items: &[ContentItem], ledger: &InteractionLedger, key: SortKey) -> Vec<ContentItem> {
    let mut out = items.to_vec();
    match key {
        SortKey::Likes => out.sort_by(|a, b| ledger.likes(&b.id).cmp(&ledger.likes(&a.id))),
        SortKey::Date => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortKey::Comments => out.sort_by(|a, b| {
            ledger
                .comments(&b.id)
                .len()
                .cmp(&ledger.comments(&a.id).len())
        }),
    }
    out
}

/// Map a 0-based leaderboard position to its medal or ordinal label.
pub fn rank(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("#{}", n + 1),
    }
}

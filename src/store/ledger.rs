//! Per-item interaction bookkeeping: like counts and comment lists.

use std::collections::BTreeMap;

use crate::model::InteractionRecord;
use crate::store::intent::IntentError;

/// Owns the mapping from content-item identity to interaction counters.
///
/// The ledger is total over the identity space: operations on an unknown
/// id lazily materialize a zero record, and reads treat absence as zero.
/// Records are never deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionLedger {
    records: BTreeMap<String, InteractionRecord>,
    /// Comments across all items. Global by design (single-user model).
    total_comments: u64,
}

impl InteractionLedger {
    /// Rebuild a ledger from persisted records and the stored global
    /// comment counter.
    pub fn from_parts(records: BTreeMap<String, InteractionRecord>, total_comments: u64) -> Self {
        Self {
            records,
            total_comments,
        }
    }

    fn entry(&mut self, item_id: &str) -> &mut InteractionRecord {
        self.records.entry(item_id.to_string()).or_default()
    }

    /// Record one like and return the new count.
    ///
    /// Counts only go up; there is no unlike path (see DESIGN.md).
    pub fn like(&mut self, item_id: &str) -> u64 {
        let record = self.entry(item_id);
        record.likes = record.likes.saturating_add(1);
        record.likes
    }

    /// Append a comment. Empty or whitespace-only text is rejected.
    pub fn add_comment(&mut self, item_id: &str, text: &str) -> Result<(), IntentError> {
        if text.trim().is_empty() {
            return Err(IntentError::EmptyComment);
        }
        self.entry(item_id).comments.push(text.to_string());
        self.total_comments += 1;
        Ok(())
    }

    /// Delete the comment at `index`, preserving the order of the rest.
    ///
    /// Out-of-range indexes are a defensive no-op; returns whether
    /// anything changed.
    pub fn delete_comment(&mut self, item_id: &str, index: usize) -> bool {
        match self.records.get_mut(item_id) {
            Some(record) if index < record.comments.len() => {
                record.comments.remove(index);
                self.total_comments = self.total_comments.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Like count for an item; absent records read as zero.
    pub fn likes(&self, item_id: &str) -> u64 {
        self.records.get(item_id).map(|r| r.likes).unwrap_or(0)
    }

    /// Comments for an item; absent records read as empty.
    pub fn comments(&self, item_id: &str) -> &[String] {
        self.records
            .get(item_id)
            .map(|r| r.comments.as_slice())
            .unwrap_or(&[])
    }

    /// Comments recorded across all items.
    pub fn total_comments(&self) -> u64 {
        self.total_comments
    }

    pub fn records(&self) -> &BTreeMap<String, InteractionRecord> {
        &self.records
    }
}

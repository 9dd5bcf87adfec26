//! Capacity-bounded attachment store.
//!
//! Holds the files staged for the next submission in insertion order. Adding
//! more files than the remaining capacity truncates the incoming batch; the
//! files already staged are never displaced.

use crate::models::{Attachment, AttachmentFile, AttachmentId};

/// Default number of attachments allowed per submission.
pub const DEFAULT_ATTACHMENT_LIMIT: usize = 6;

/// Result of a single `add` call.
///
/// Dropped files are reported for logging only; exceeding capacity is not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<AttachmentId>,
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentStore {
    entries: Vec<Attachment>,
    next_sequence: u64,
    limit: usize,
}

impl Default for AttachmentStore {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACHMENT_LIMIT)
    }
}

impl AttachmentStore {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
            limit,
        }
    }

    /// Stage a batch of files, keeping the first `remaining` in input order.
    pub fn add(&mut self, files: impl IntoIterator<Item = AttachmentFile>) -> AddOutcome {
        let remaining = self.remaining();
        let mut outcome = AddOutcome::default();

        for file in files {
            if outcome.added.len() < remaining {
                let id = self.issue_id();
                self.entries.push(Attachment { id, file });
                outcome.added.push(id);
            } else {
                outcome.dropped += 1;
            }
        }

        outcome
    }

    /// Remove the attachment with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: AttachmentId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Empty the store and restart id numbering.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next_sequence = 0;
    }

    #[must_use]
    pub fn get(&self, id: AttachmentId) -> Option<&Attachment> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Attachment] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.entries.len())
    }

    #[must_use]
    pub fn is_at_capacity(&self) -> bool {
        self.entries.len() >= self.limit
    }

    fn issue_id(&mut self) -> AttachmentId {
        let id = AttachmentId::from_sequence(self.next_sequence);
        self.next_sequence += 1;
        id
    }
}

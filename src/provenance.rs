//! Session provenance tracking
//!
//! Records which identities were created by this client session (not
//! by user identity, simply "created here"), driving the bulk undo of
//! self-added records and the transient highlight on fresh creations.
//!
//! Membership invariant: every tracked id was confirmed-created by a
//! prior successful create call during this session, and is removed
//! exactly when that record is deleted, never otherwise.
//!
//! A tracked record moves through:
//! `untracked -> tracked+highlighted -> tracked -> untracked (deleted)`

use crate::models::{Collection, RecordId};
use std::collections::{HashMap, HashSet};
use tokio::time::{Duration, Instant};

/// How long a freshly created record stays highlighted
pub const HIGHLIGHT_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
struct CollectionProvenance {
    created: HashSet<RecordId>,
    /// Highlight deadline per id; one-shot, never renewed by later
    /// creations of other records
    highlights: HashMap<RecordId, Instant>,
}

/// Tracks session-created identities per collection
#[derive(Debug, Default)]
pub struct ProvenanceTracker {
    users: CollectionProvenance,
    paths: CollectionProvenance,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, collection: Collection) -> &CollectionProvenance {
        match collection {
            Collection::Users => &self.users,
            Collection::CreativityPaths => &self.paths,
        }
    }

    fn slot_mut(&mut self, collection: Collection) -> &mut CollectionProvenance {
        match collection {
            Collection::Users => &mut self.users,
            Collection::CreativityPaths => &mut self.paths,
        }
    }

    /// Record a confirmed-created identity and start its highlight
    pub fn record_created(&mut self, collection: Collection, id: RecordId) {
        let slot = self.slot_mut(collection);
        slot.highlights.insert(id.clone(), Instant::now() + HIGHLIGHT_TTL);
        slot.created.insert(id);
    }

    /// Was this identity created by the current session?
    pub fn is_session_created(&self, collection: Collection, id: &RecordId) -> bool {
        self.slot(collection).created.contains(id)
    }

    /// Is this identity still inside its highlight window?
    pub fn is_highlighted(&self, collection: Collection, id: &RecordId) -> bool {
        match self.slot(collection).highlights.get(id) {
            Some(deadline) => Instant::now() < *deadline,
            None => false,
        }
    }

    /// Drop an identity after its record has been deleted
    pub fn forget(&mut self, collection: Collection, id: &RecordId) {
        let slot = self.slot_mut(collection);
        slot.created.remove(id);
        slot.highlights.remove(id);
    }

    /// Snapshot of the tracked identities for one collection
    pub fn tracked(&self, collection: Collection) -> Vec<RecordId> {
        self.slot(collection).created.iter().cloned().collect()
    }

    /// Total tracked identities across both collections
    pub fn tracked_count(&self) -> usize {
        self.users.created.len() + self.paths.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked_count() == 0
    }
}

//! Optimistic comment overlay
//!
//! Lets the acting user's comment appear immediately while the authoritative
//! write is in flight, then converges to the server truth on reconcile.

use crate::models::{Comment, CommentKey, CommentView};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// Generate a provisional client-side comment id.
pub fn new_local_id() -> String {
    format!("local-{}", Uuid::new_v4())
}

/// Resolution of an in-flight authoritative write.
#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    /// The server accepted the action and returned the persisted row.
    Confirmed(Comment),
    /// The write failed; the optimistic entry is reverted. No automatic
    /// retry; the caller surfaces a retry affordance.
    Failed,
}

/// Pending comments keyed by client-generated local id, overlaid on
/// server-confirmed data at read time.
#[derive(Debug, Default)]
pub struct OptimisticComments {
    pending: BTreeMap<String, Comment>,
}

impl OptimisticComments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending comment under `local_id`, visible immediately in the
    /// merged view. Re-applying the same id overwrites rather than
    /// duplicates.
    pub fn apply(&mut self, local_id: &str, comment: Comment) {
        self.pending.insert(local_id.to_string(), comment);
    }

    /// Resolve the in-flight write for `local_id`. Success hands display
    /// over to the confirmed row; failure reverts to the last known server
    /// state. If two resolutions race for the same key, the most recent one
    /// determines final state.
    pub fn reconcile(&mut self, local_id: &str, outcome: ReconcileOutcome) {
        let removed = self.pending.remove(local_id);
        match outcome {
            ReconcileOutcome::Confirmed(confirmed) => {
                debug!(local_id, confirmed_id = %confirmed.id, "optimistic comment confirmed");
            }
            ReconcileOutcome::Failed => {
                if removed.is_some() {
                    debug!(local_id, "optimistic comment reverted after failed write");
                }
            }
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Overlay pending comments onto the server-confirmed list, newest
    /// first. A pending entry whose logical key already appears confirmed is
    /// suppressed, so the view never shows the same action twice and a
    /// confirmed item keeps its position.
    pub fn merged_view(&self, server: &[Comment]) -> Vec<CommentView> {
        let confirmed: HashSet<CommentKey> = server.iter().map(Comment::logical_key).collect();

        let mut view: Vec<CommentView> = server
            .iter()
            .cloned()
            .map(|comment| CommentView {
                comment,
                is_optimistic: false,
            })
            .collect();

        view.extend(
            self.pending
                .values()
                .filter(|comment| !confirmed.contains(&comment.logical_key()))
                .cloned()
                .map(|comment| CommentView {
                    comment,
                    is_optimistic: true,
                }),
        );

        view.sort_by(|a, b| {
            b.comment
                .created_at
                .cmp(&a.comment.created_at)
                .then_with(|| a.comment.id.cmp(&b.comment.id))
        });
        view
    }
}

//! Comment data models

use super::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-confirmed comment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub pool_id: String,
    pub user_address: Address,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Comment {
    /// Logical identity used to match an optimistic entry against its
    /// server-confirmed row. Provisional ids differ between client and
    /// server; this triple does not.
    pub fn logical_key(&self) -> CommentKey {
        CommentKey {
            pool_id: self.pool_id.clone(),
            author: self.user_address.clone(),
            created_at: self.created_at,
        }
    }
}

/// (pool, author, timestamp) triple identifying one logical comment action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentKey {
    pub pool_id: String,
    pub author: Address,
    pub created_at: DateTime<Utc>,
}

/// A comment as displayed: either server-confirmed or still optimistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub is_optimistic: bool,
}

/// A top-level comment with its derived, non-owning reply view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Group comments into top-level threads, attaching children by parent id.
/// Replies are ordered oldest-first within a thread.
pub fn build_threads(comments: &[Comment]) -> Vec<CommentThread> {
    let mut threads: Vec<CommentThread> = comments
        .iter()
        .filter(|c| c.parent_id.is_none())
        .cloned()
        .map(|comment| CommentThread {
            comment,
            replies: Vec::new(),
        })
        .collect();

    for reply in comments.iter().filter(|c| c.parent_id.is_some()) {
        let parent = reply.parent_id.as_deref().unwrap_or_default();
        if let Some(thread) = threads.iter_mut().find(|t| t.comment.id == parent) {
            thread.replies.push(reply.clone());
        }
    }

    for thread in &mut threads {
        thread.replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }

    threads
}

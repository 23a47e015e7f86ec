//! Optimistic local state for social actions

mod comments;
mod likes;

pub use comments::{new_local_id, OptimisticComments, ReconcileOutcome};
pub use likes::{JsonFileSink, LikeSink, LikeStore, MemorySink};

//! Liked-comment state with debounced durable persistence
//!
//! Rapid toggles accumulate in memory and are flushed after a quiet period,
//! so a burst of updates costs a single durable write. Pending entries always
//! win over the persisted map when reading. At most one flush timer exists;
//! arming a new one aborts its predecessor.

use crate::error::CoreResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Durable destination for the liked-comments map.
pub trait LikeSink: Send + Sync + 'static {
    fn load(&self) -> CoreResult<HashMap<String, bool>>;
    fn store(&self, likes: &HashMap<String, bool>) -> CoreResult<()>;
}

impl<S: LikeSink> LikeSink for Arc<S> {
    fn load(&self) -> CoreResult<HashMap<String, bool>> {
        self.as_ref().load()
    }

    fn store(&self, likes: &HashMap<String, bool>) -> CoreResult<()> {
        self.as_ref().store(likes)
    }
}

/// JSON file under the configured storage directory, keyed by the fixed
/// `likedComments` name.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("likedComments.json"),
        }
    }
}

impl LikeSink for JsonFileSink {
    fn load(&self) -> CoreResult<HashMap<String, bool>> {
        match std::fs::read_to_string(&self.path) {
            // an unreadable map degrades to empty rather than failing reads
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, likes: &HashMap<String, bool>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(likes)?)?;
        Ok(())
    }
}

/// In-memory sink for tests; counts durable writes.
#[derive(Default)]
pub struct MemorySink {
    state: Mutex<HashMap<String, bool>>,
    writes: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.state.lock().unwrap().clone()
    }
}

impl LikeSink for MemorySink {
    fn load(&self) -> CoreResult<HashMap<String, bool>> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn store(&self, likes: &HashMap<String, bool>) -> CoreResult<()> {
        *self.state.lock().unwrap() = likes.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Inner {
    sink: Box<dyn LikeSink>,
    pending: Mutex<HashMap<String, bool>>,
    flush_task: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

/// Optimistic like state with a debounced flush to durable storage.
///
/// Must live inside a tokio runtime; the debounce timer is a spawned task.
#[derive(Clone)]
pub struct LikeStore {
    inner: Arc<Inner>,
}

impl LikeStore {
    pub fn new<S: LikeSink>(sink: S, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink: Box::new(sink),
                pending: Mutex::new(HashMap::new()),
                flush_task: Mutex::new(None),
                debounce,
            }),
        }
    }

    /// Current like status: pending updates take precedence over storage.
    pub fn is_liked(&self, comment_id: &str) -> bool {
        if let Some(liked) = self.inner.pending.lock().unwrap().get(comment_id) {
            return *liked;
        }
        persisted(&self.inner)
            .get(comment_id)
            .copied()
            .unwrap_or(false)
    }

    /// Record a like toggle and (re)arm the debounce timer. Last writer wins
    /// per comment id within the session.
    pub fn save_like(&self, comment_id: &str, liked: bool) {
        self.inner
            .pending
            .lock()
            .unwrap()
            .insert(comment_id.to_string(), liked);
        self.arm_timer();
    }

    fn arm_timer(&self) {
        let mut slot = self.inner.flush_task.lock().unwrap();
        if let Some(task) = slot.take() {
            task.abort();
        }
        let inner = Arc::clone(&self.inner);
        let debounce = self.inner.debounce;
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(err) = flush_inner(&inner) {
                warn!(error = %err, "debounced like flush failed");
            }
        }));
    }

    /// Merge pending updates into storage immediately, cancelling any armed
    /// timer.
    pub fn flush(&self) -> CoreResult<()> {
        if let Some(task) = self.inner.flush_task.lock().unwrap().take() {
            task.abort();
        }
        flush_inner(&self.inner)
    }

    /// Teardown hook: persist whatever is pending without waiting out the
    /// debounce window.
    pub fn shutdown(&self) -> CoreResult<()> {
        self.flush()
    }

    pub fn pending_len(&self) -> usize {
        self.inner.pending.lock().unwrap().len()
    }
}

fn persisted(inner: &Inner) -> HashMap<String, bool> {
    match inner.sink.load() {
        Ok(map) => map,
        Err(err) => {
            warn!(error = %err, "failed to load liked-comments map, treating as empty");
            HashMap::new()
        }
    }
}

fn flush_inner(inner: &Inner) -> CoreResult<()> {
    let taken = {
        let mut pending = inner.pending.lock().unwrap();
        std::mem::take(&mut *pending)
    };
    if taken.is_empty() {
        return Ok(());
    }

    // read-merge-write immediately before storing so entries persisted by
    // other sessions are not lost
    let mut merged = persisted(inner);
    merged.extend(taken.iter().map(|(k, v)| (k.clone(), *v)));

    match inner.sink.store(&merged) {
        Ok(()) => {
            debug!(entries = taken.len(), "flushed like state");
            Ok(())
        }
        Err(err) => {
            // keep the updates pending so a later flush can retry; entries
            // written in the meantime still win
            let mut pending = inner.pending.lock().unwrap();
            for (k, v) in taken {
                pending.entry(k).or_insert(v);
            }
            Err(err)
        }
    }
}

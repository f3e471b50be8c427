use crate::utils::error::Result;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A fetch in flight. The owning component keeps the handle for as long as it
/// is interested in the result; `cancel` marks the handle stale so a late
/// completion becomes a no-op instead of updating state after disposal.
pub struct FetchHandle<T> {
    task: JoinHandle<Result<T>>,
    live: Arc<AtomicBool>,
}

impl<T: Send + 'static> FetchHandle<T> {
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(fut),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Marks the handle stale and aborts the underlying task. Idempotent.
    pub fn cancel(&self) {
        self.live.store(false, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Waits for the fetch. Returns `None` when the handle was cancelled,
    /// whether or not the task managed to finish first.
    pub async fn join(self) -> Option<Result<T>> {
        let outcome = self.task.await;
        if !self.live.load(Ordering::SeqCst) {
            return None;
        }
        match outcome {
            Ok(result) => Some(result),
            Err(join_err) if join_err.is_cancelled() => None,
            Err(join_err) => Some(Err(std::io::Error::other(join_err.to_string()).into())),
        }
    }
}

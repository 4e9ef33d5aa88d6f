//! Live project feed.
//!
//! A standing subscription to the project list: one background task
//! rebuilds the entire normalized list from the database on every change
//! notification and publishes it through a `watch` channel. The list is
//! replaced wholesale on each rebuild, never patched incrementally.

use std::sync::Arc;

use folio_core::project::{normalize, sort_for_display, Project};
use folio_db::repositories::ProjectRepo;
use folio_db::DbPool;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::bus::EventBus;

/// The current state of the feed.
///
/// `loading` is `true` until the first successful rebuild and `false`
/// forever after, even if the list later becomes empty. A failed rebuild
/// keeps the previous list and records the failure in `last_error` so
/// consumers can offer a retry affordance.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub loading: bool,
    pub projects: Arc<Vec<Project>>,
    pub last_error: Option<String>,
}

impl FeedSnapshot {
    fn initial() -> Self {
        Self {
            loading: true,
            projects: Arc::new(Vec::new()),
            last_error: None,
        }
    }
}

/// The live feed subscription entry point.
pub struct ProjectFeed;

impl ProjectFeed {
    /// Start the feed: rebuild immediately, then rebuild on every
    /// list-changing event from the bus.
    ///
    /// The returned [`FeedHandle`] owns the subscription; dropping it (or
    /// calling [`FeedHandle::close`]) cancels the background task so no
    /// callback can touch state after the owner is gone.
    pub fn subscribe(pool: DbPool, bus: &EventBus) -> FeedHandle {
        let (tx, rx) = watch::channel(FeedSnapshot::initial());
        let cancel = CancellationToken::new();
        let mut events = bus.subscribe();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            rebuild(&pool, &tx).await;

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    received = events.recv() => match received {
                        Ok(event) if event.changes_project_list() => {
                            rebuild(&pool, &tx).await;
                        }
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            // Events were dropped; the rebuild is a full
                            // replacement, so one catches everything up.
                            tracing::warn!(missed, "Feed lagged behind the event bus");
                            rebuild(&pool, &tx).await;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }

            tracing::debug!("Project feed subscription released");
        });

        FeedHandle {
            rx,
            cancel,
            task: Some(task),
        }
    }
}

/// Query, normalize every row, sort, and replace the snapshot wholesale.
async fn rebuild(pool: &DbPool, tx: &watch::Sender<FeedSnapshot>) {
    match ProjectRepo::list_for_display(pool).await {
        Ok(rows) => {
            let mut projects: Vec<Project> = rows
                .into_iter()
                .map(|row| normalize(row.into_record()))
                .collect();
            sort_for_display(&mut projects);

            let _ = tx.send(FeedSnapshot {
                loading: false,
                projects: Arc::new(projects),
                last_error: None,
            });
        }
        Err(error) => {
            tracing::warn!(%error, "Project feed rebuild failed");
            let previous = tx.borrow().clone();
            let _ = tx.send(FeedSnapshot {
                last_error: Some(error.to_string()),
                ..previous
            });
        }
    }
}

/// Owner of one feed subscription.
pub struct FeedHandle {
    rx: watch::Receiver<FeedSnapshot>,
    cancel: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl FeedHandle {
    /// The current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.rx.borrow().clone()
    }

    /// A receiver that observes every wholesale replacement.
    pub fn watch(&self) -> watch::Receiver<FeedSnapshot> {
        self.rx.clone()
    }

    /// Cancel the subscription and wait for the task to finish.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        // Idempotent; `close()` may already have cancelled.
        self.cancel.cancel();
    }
}

//! Fan-out of live updates to WebSocket clients.
//!
//! One background task bridges the in-process channels to the browser:
//! every wholesale feed replacement goes out as a `projects.snapshot`
//! frame, and bus events (creation, deletion, upload progress) are
//! forwarded under their own event type.

use std::sync::Arc;

use folio_events::{EventBus, FeedSnapshot};
use serde_json::json;
use tokio::sync::{broadcast, watch};

use crate::ws::WsManager;

/// Wire frame type for feed snapshots.
pub const SNAPSHOT_TYPE: &str = "projects.snapshot";

/// Build the JSON frame for a feed snapshot.
pub fn snapshot_frame(snapshot: &FeedSnapshot) -> serde_json::Value {
    json!({
        "type": SNAPSHOT_TYPE,
        "data": {
            "loading": snapshot.loading,
            "projects": &*snapshot.projects,
            "lastError": snapshot.last_error,
        },
    })
}

/// Spawn the broadcaster task.
///
/// Runs until both the feed watch channel and the event bus close, which
/// happens during shutdown when their senders are dropped.
pub fn start_broadcaster(
    mut feed: watch::Receiver<FeedSnapshot>,
    bus: &EventBus,
    ws_manager: Arc<WsManager>,
) -> tokio::task::JoinHandle<()> {
    let mut events = bus.subscribe();

    tokio::spawn(async move {
        let mut feed_open = true;
        loop {
            tokio::select! {
                changed = feed.changed(), if feed_open => match changed {
                    Ok(()) => {
                        let frame = snapshot_frame(&feed.borrow_and_update());
                        ws_manager.broadcast_json(&frame).await;
                    }
                    Err(_) => feed_open = false,
                },
                received = events.recv() => match received {
                    Ok(event) => {
                        ws_manager
                            .broadcast_json(&json!({
                                "type": event.event_type,
                                "projectId": event.project_id,
                                "payload": event.payload,
                                "timestamp": event.timestamp,
                            }))
                            .await;
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Live broadcaster lagged behind the event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        tracing::debug!("Live broadcaster stopped");
    })
}

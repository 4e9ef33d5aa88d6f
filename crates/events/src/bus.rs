//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the hub the admin mutation pipeline publishes into and
//! the live feed and WebSocket fan-out subscribe to. Shared as
//! `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use folio_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A project entry was created.
pub const PROJECT_CREATED: &str = "project.created";
/// A project entry was deleted.
pub const PROJECT_DELETED: &str = "project.deleted";
/// An image upload made progress (payload: `key`, `percent`).
pub const UPLOAD_PROGRESS: &str = "upload.progress";

/// A domain event that occurred on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEvent {
    /// Dot-separated event name, e.g. `"project.created"`.
    pub event_type: String,

    /// The project the event concerns, when there is one.
    pub project_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SiteEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            project_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the subject project.
    pub fn with_project(mut self, project_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Set the JSON payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `true` for events that change the project list and should trigger
    /// a feed rebuild.
    pub fn changes_project_list(&self) -> bool {
        self.event_type == PROJECT_CREATED || self.event_type == PROJECT_DELETED
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity. Slow receivers that
    /// fall more than `capacity` events behind observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. With zero subscribers
    /// the event is silently dropped.
    pub fn publish(&self, event: SiteEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

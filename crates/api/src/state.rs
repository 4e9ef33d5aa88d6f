use std::sync::Arc;

use folio_events::{EventBus, FeedSnapshot};
use folio_storage::ObjectStore;
use tokio::sync::watch;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing site events.
    pub event_bus: Arc<EventBus>,
    /// Object store the mutation pipeline uploads cover images into.
    pub store: Arc<dyn ObjectStore>,
    /// Receiver side of the live project feed; `borrow()` yields the
    /// current wholesale snapshot.
    pub feed: watch::Receiver<FeedSnapshot>,
}

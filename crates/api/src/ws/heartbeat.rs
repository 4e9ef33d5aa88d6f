use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Seconds between keep-alive pings.
const PING_INTERVAL_SECS: u64 = 30;

/// Spawn the keep-alive task: a Ping frame to every viewer connection on
/// a fixed interval. Visitors leave the showcase open in a background
/// tab, and intermediate proxies reap connections that go quiet.
///
/// Runs for the life of the server; shutdown aborts the returned handle.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));

        loop {
            ticker.tick().await;
            let count = ws_manager.connection_count().await;
            tracing::debug!(count, "Pinging connected viewers");
            ws_manager.ping_all().await;
        }
    })
}

//! Event bus and live project feed.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SiteEvent`] — the domain event envelope.
//! - [`ProjectFeed`] — the standing subscription that rebuilds the
//!   normalized project list on every change notification and replaces
//!   it wholesale through a `watch` channel.

pub mod bus;
pub mod feed;

pub use bus::{EventBus, SiteEvent, PROJECT_CREATED, PROJECT_DELETED, UPLOAD_PROGRESS};
pub use feed::{FeedHandle, FeedSnapshot, ProjectFeed};

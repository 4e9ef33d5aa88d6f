//! Object storage for uploaded cover images.
//!
//! [`ObjectStore`] is the seam the mutation pipeline writes through: put
//! bytes under a key, observe incremental progress, get back a publicly
//! resolvable URL. [`LocalObjectStore`] is the filesystem-backed
//! implementation served from the API's static upload route.

mod local;
mod object_store;

pub use local::LocalObjectStore;
pub use object_store::{
    object_key, ObjectStore, ProgressSender, StorageError, UploadProgress,
};

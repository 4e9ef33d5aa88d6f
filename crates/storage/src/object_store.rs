//! The store trait, progress reporting, and upload key derivation.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

/// Errors from an object store backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A progress sample for an in-flight upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Whole-number percentage in 0..=100. An empty object reports 100.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        ((self.bytes_sent * 100) / self.total_bytes) as u8
    }
}

/// Channel half handed to [`ObjectStore::put`] for progress samples.
/// Receivers that hang up do not fail the upload.
pub type ProgressSender = mpsc::UnboundedSender<UploadProgress>;

/// Binary object storage at its interface boundary: store bytes, issue a
/// URL any client can resolve without further auth.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, emitting progress samples along the way.
    /// Resolves with the public URL of the stored object.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        progress: Option<ProgressSender>,
    ) -> Result<String, StorageError>;
}

/// Derive the storage key for an uploaded file: the sanitized original
/// filename plus a current-time suffix for uniqueness, under `projects/`.
pub fn object_key(original_name: &str, now_millis: i64) -> String {
    let name: String = original_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("projects/{name}_{now_millis}")
}

//! Filesystem-backed object store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;

use crate::object_store::{ObjectStore, ProgressSender, StorageError, UploadProgress};

/// Bytes written between progress samples.
const CHUNK_SIZE: usize = 64 * 1024;

/// Stores objects under a root directory and issues URLs under a public
/// base (the API serves that base as static files).
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a key to a path inside the root, rejecting anything that
    /// would escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|component| {
            !matches!(component, Component::Normal(_))
        });
        if key.is_empty() || escapes {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        progress: Option<ProgressSender>,
    ) -> Result<String, StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let total_bytes = data.len() as u64;
        let mut file = tokio::fs::File::create(&path).await?;
        let mut bytes_sent: u64 = 0;

        for chunk in data.chunks(CHUNK_SIZE) {
            file.write_all(chunk).await?;
            bytes_sent += chunk.len() as u64;
            if let Some(sender) = &progress {
                // A receiver that hung up is not an upload failure.
                let _ = sender.send(UploadProgress { bytes_sent, total_bytes });
            }
        }
        file.flush().await?;

        if let Some(sender) = &progress {
            let _ = sender.send(UploadProgress {
                bytes_sent: total_bytes,
                total_bytes,
            });
        }

        tracing::debug!(key, total_bytes, "Stored object");
        Ok(format!("{}/{key}", self.public_base_url))
    }
}

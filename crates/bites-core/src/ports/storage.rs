//! Blob store port - abstraction over image storage backends.

use async_trait::async_trait;

/// Blob store trait. Paths are bucket-relative, e.g. `"a1b2c3.jpg"` for
/// food pictures or `"{user_id}/avatar.png"` for avatars. Uploads use
/// freshly generated names, so there is no write contention except the
/// fixed avatar slot, which is last-writer-wins per user.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes under `path`. Never overwrites an existing blob.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), BlobError>;

    /// Remove a single blob.
    async fn remove(&self, path: &str) -> Result<(), BlobError>;

    /// Remove several blobs. Missing blobs are not an error.
    async fn remove_many(&self, paths: &[String]) -> Result<(), BlobError>;

    /// Public URL clients can fetch the blob from.
    fn public_url(&self, path: &str) -> String;
}

/// Blob store errors.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob already exists at {0}")]
    AlreadyExists(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Remove failed: {0}")]
    Remove(String),
}

//! In-memory blob store - used as fallback when no blob root is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bites_core::ports::{BlobError, BlobStore};

/// In-memory blob store using a HashMap with an async RwLock.
///
/// Note: blobs are lost on process restart.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.blobs.read().await.contains_key(path)
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(path) {
            return Err(BlobError::AlreadyExists(path.to_owned()));
        }
        blobs.insert(path.to_owned(), bytes);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), BlobError> {
        self.blobs.write().await.remove(path);
        Ok(())
    }

    async fn remove_many(&self, paths: &[String]) -> Result<(), BlobError> {
        let mut blobs = self.blobs.write().await;
        for path in paths {
            blobs.remove(path);
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_remove() {
        let store = InMemoryBlobStore::new();
        store.upload("pic.jpg", vec![1]).await.unwrap();
        assert!(store.contains("pic.jpg").await);

        store.remove("pic.jpg").await.unwrap();
        assert!(!store.contains("pic.jpg").await);
    }

    #[tokio::test]
    async fn test_duplicate_upload_is_rejected() {
        let store = InMemoryBlobStore::new();
        store.upload("pic.jpg", vec![1]).await.unwrap();
        assert!(matches!(
            store.upload("pic.jpg", vec![2]).await,
            Err(BlobError::AlreadyExists(_))
        ));
    }
}

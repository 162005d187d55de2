//! Filesystem-backed blob store.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use bites_core::ports::{BlobError, BlobStore};

/// Blob store writing under a root directory, one bucket per instance.
/// A reverse proxy or static-file service is expected to serve the root at
/// `public_base`.
pub struct FsBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Resolve a bucket-relative path, rejecting anything that would
    /// escape the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes || path.is_empty() {
            return Err(BlobError::Upload(format!("invalid blob path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::Upload(e.to_string()))?;
        }

        // Names are freshly generated UUIDs, so an existing file means a
        // collision or a logic error upstream; refuse to overwrite.
        if tokio::fs::try_exists(&full)
            .await
            .map_err(|e| BlobError::Upload(e.to_string()))?
        {
            return Err(BlobError::AlreadyExists(path.to_owned()));
        }

        tokio::fs::write(&full, bytes)
            .await
            .map_err(|e| BlobError::Upload(e.to_string()))?;

        tracing::debug!(path = %path, "Blob stored");
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), BlobError> {
        let full = self.resolve(path).map_err(|e| BlobError::Remove(e.to_string()))?;

        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlobError::Remove(e.to_string())),
        }
    }

    async fn remove_many(&self, paths: &[String]) -> Result<(), BlobError> {
        for path in paths {
            self.remove(path).await?;
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base, path)
    }
}

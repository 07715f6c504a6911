//! Filesystem artifact store
//!
//! Artifacts are written to `<root>/<Category>/<group>/<item>`.

use crate::storage::traits::{ArtifactContent, ArtifactKey, ArtifactStore, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Artifact store backed by a directory tree
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path an artifact is written to
    pub fn path_for(&self, key: &ArtifactKey) -> PathBuf {
        self.root
            .join(key.category.as_str())
            .join(&key.group)
            .join(&key.item)
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn put(&self, key: &ArtifactKey, content: &ArtifactContent) -> StorageResult<()> {
        key.validate()?;

        let path = self.path_for(key);
        if let Some(folder) = path.parent() {
            tokio::fs::create_dir_all(folder).await?;
        }

        tokio::fs::write(&path, content.render()).await?;
        tracing::trace!("Wrote {}", path.display());
        Ok(())
    }

    async fn remove(&self, key: &ArtifactKey) -> StorageResult<()> {
        key.validate()?;

        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::trace!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Category, StorageError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_creates_folders() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::new(Category::Links, "Dog", "Wolf");

        store
            .put(
                &key,
                &ArtifactContent::Lines(vec!["/wiki/Canis".into(), "/wiki/Pack".into()]),
            )
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("Links/Dog/Wolf")).unwrap();
        assert_eq!(written, "/wiki/Canis\n/wiki/Pack\n");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::new(Category::Words, "Dog", "Wolf");

        store
            .put(&key, &ArtifactContent::Text("first run words".into()))
            .await
            .unwrap();
        store
            .put(&key, &ArtifactContent::Text("second".into()))
            .await
            .unwrap();

        let written = std::fs::read_to_string(store.path_for(&key)).unwrap();
        assert_eq!(written, "second");
    }

    #[tokio::test]
    async fn test_put_rejects_escaping_key() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::new(Category::Words, "Dog", "..");

        let result = store.put(&key, &ArtifactContent::Text("x".into())).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_put_reports_io_errors() {
        let dir = TempDir::new().unwrap();
        // A file where the category folder should be
        std::fs::write(dir.path().join("Words"), "not a folder").unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::new(Category::Words, "Dog", "Wolf");

        let result = store.put(&key, &ArtifactContent::Text("x".into())).await;
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let key = ArtifactKey::new(Category::Links, "Dog", "Wolf");

        store
            .put(&key, &ArtifactContent::Lines(vec!["/wiki/Canis".into()]))
            .await
            .unwrap();
        store.remove(&key).await.unwrap();
        assert!(!store.path_for(&key).exists());

        // Removing again is a no-op
        store.remove(&key).await.unwrap();
    }
}

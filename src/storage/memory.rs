//! In-memory artifact store

use crate::storage::traits::{ArtifactContent, ArtifactKey, ArtifactStore, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Artifact store that keeps everything in a map
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: Mutex<HashMap<ArtifactKey, ArtifactContent>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the artifact stored under `key`
    pub fn get(&self, key: &ArtifactKey) -> Option<ArtifactContent> {
        self.lock().get(key).cloned()
    }

    /// Returns all stored keys, sorted by their display form
    pub fn keys(&self) -> Vec<ArtifactKey> {
        let mut keys: Vec<ArtifactKey> = self.lock().keys().cloned().collect();
        keys.sort_by_key(|key| key.to_string());
        keys
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ArtifactKey, ArtifactContent>> {
        // A panic while holding the lock cannot leave the map half-written
        self.artifacts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn put(&self, key: &ArtifactKey, content: &ArtifactContent) -> StorageResult<()> {
        key.validate()?;
        self.lock().insert(key.clone(), content.clone());
        Ok(())
    }

    async fn remove(&self, key: &ArtifactKey) -> StorageResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

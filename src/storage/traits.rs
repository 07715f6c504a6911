//! Storage traits and error types
//!
//! This module defines the trait interface for artifact stores and the
//! keys and contents they persist.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid artifact key component: '{0}'")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Artifact category, the top level of the store hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Links,
    Words,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Links => "Links",
            Self::Words => "Words",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of one artifact: category, group (seed article) and item (article)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub category: Category,
    pub group: String,
    pub item: String,
}

impl ArtifactKey {
    pub fn new(category: Category, group: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            category,
            group: group.into(),
            item: item.into(),
        }
    }

    /// Rejects group and item names that would escape their folder
    pub fn validate(&self) -> StorageResult<()> {
        for part in [&self.group, &self.item] {
            if part.is_empty()
                || part == "."
                || part == ".."
                || part.contains('/')
                || part.contains('\\')
            {
                return Err(StorageError::InvalidKey(part.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.group, self.item)
    }
}

/// Artifact payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContent {
    /// Written one entry per line
    Lines(Vec<String>),
    /// Written verbatim
    Text(String),
}

impl ArtifactContent {
    /// Renders the content the way it is written to disk
    pub fn render(&self) -> String {
        match self {
            Self::Lines(lines) => lines.iter().map(|line| format!("{}\n", line)).collect(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Trait for artifact store implementations
///
/// Writes create any missing intermediate grouping and overwrite existing
/// content at the same key.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stores `content` under `key`
    async fn put(&self, key: &ArtifactKey, content: &ArtifactContent) -> StorageResult<()>;

    /// Deletes the artifact under `key`; a missing artifact is not an error
    async fn remove(&self, key: &ArtifactKey) -> StorageResult<()>;
}

#[async_trait]
impl<T: ArtifactStore + ?Sized> ArtifactStore for Arc<T> {
    async fn put(&self, key: &ArtifactKey, content: &ArtifactContent) -> StorageResult<()> {
        (**self).put(key, content).await
    }

    async fn remove(&self, key: &ArtifactKey) -> StorageResult<()> {
        (**self).remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = ArtifactKey::new(Category::Links, "Dog", "Wolf");
        assert_eq!(key.to_string(), "Links/Dog/Wolf");
    }

    #[test]
    fn test_key_validation() {
        assert!(ArtifactKey::new(Category::Words, "Dog", "Wolf").validate().is_ok());
        assert!(ArtifactKey::new(Category::Words, "Dog", "Caf%C3%A9").validate().is_ok());

        assert!(ArtifactKey::new(Category::Words, "", "Wolf").validate().is_err());
        assert!(ArtifactKey::new(Category::Words, "Dog", "..").validate().is_err());
        assert!(ArtifactKey::new(Category::Words, "Dog", "a/b").validate().is_err());
        assert!(ArtifactKey::new(Category::Words, "a\\b", "Wolf").validate().is_err());
    }

    #[test]
    fn test_render() {
        let lines = ArtifactContent::Lines(vec!["/wiki/A".into(), "/wiki/B".into()]);
        assert_eq!(lines.render(), "/wiki/A\n/wiki/B\n");
        assert_eq!(ArtifactContent::Lines(vec![]).render(), "");
        assert_eq!(ArtifactContent::Text("cat dog".into()).render(), "cat dog");
    }
}

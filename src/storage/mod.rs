//! Storage module for persisting crawl artifacts
//!
//! This module handles:
//! - The `ArtifactStore` trait used by the crawler
//! - A filesystem store writing `Links/` and `Words/` folders
//! - An in-memory store for tests and embedding

mod fs;
mod memory;
mod traits;

pub use fs::FsArtifactStore;
pub use memory::MemoryArtifactStore;
pub use traits::{
    ArtifactContent, ArtifactKey, ArtifactStore, Category, StorageError, StorageResult,
};

use std::path::Path;

/// Opens the filesystem store rooted at `path`
///
/// Folders are created lazily on the first write.
pub fn open_store(path: &Path) -> FsArtifactStore {
    FsArtifactStore::new(path)
}

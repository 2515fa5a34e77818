//! Byte storage keyed by GAV path

use crate::paths::resolve;
use bytes::Bytes;
use depot_core::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::trace;

/// Local content store rooted at one repository's storage directory
///
/// An absent file is a cache miss, not an error. Writes go to a uniquely
/// named temporary sibling and are renamed into place, so concurrent
/// writers of the same key leave exactly one writer's complete bytes.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ContentStore { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read stored content; `Ok(None)` is a cache miss
    pub async fn read(&self, gav: &str) -> Result<Option<Bytes>> {
        let path = resolve(&self.root, gav)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(Bytes::from(bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(path, "read", e)),
        }
    }

    /// Write content, creating intermediate directories as needed
    pub async fn write(&self, gav: &str, bytes: &[u8]) -> Result<()> {
        let path = resolve(&self.root, gav)?;
        let parent = path
            .parent()
            .ok_or_else(|| Error::path_traversal(gav))?;

        if let Err(e) = fs::create_dir_all(parent).await {
            return Err(Error::storage(parent.to_path_buf(), "create directory", e));
        }

        let unique_id = uuid::Uuid::new_v4();
        let temp_path = path.with_extension(format!("tmp.{unique_id}"));

        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(Error::storage(temp_path, "write", e));
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(Error::storage(path, "rename", e));
        }

        trace!(path = %path.display(), length = bytes.len(), "stored artifact");
        Ok(())
    }
}

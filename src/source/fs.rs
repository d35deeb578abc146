//! File-system backed content.

use std::path::{Path, PathBuf};

use super::ContentSource;

/// Reads documents relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a document path against the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl ContentSource for FsSource {
    fn content(&self, path: &str) -> Option<String> {
        let full = self.resolve(path);
        match std::fs::read_to_string(&full) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Failed to read {}: {}", full.display(), e);
                None
            }
        }
    }
}

/// Read a document without blocking the caller's runtime.
///
/// Failures degrade to `None`, like the synchronous source.
#[cfg(feature = "async")]
pub async fn read_content_async(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

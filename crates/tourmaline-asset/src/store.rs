//! File-backed asset byte store.
//!
//! Thin read/write abstraction over named blobs on the local file system.
//! Writes declare their length up front; a transfer that moves any other
//! number of bytes fails and leaves no readable artifact behind.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::AssetStoreError;

/// Stores assets as files under a root directory.
///
/// Asset names may contain `/` separators, which map to subdirectories
/// under the root. Names that are empty, absolute, or contain `..`
/// components are rejected before touching the file system.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Opens the named asset for reading.
    ///
    /// # Errors
    ///
    /// [`AssetStoreError::NotFound`] if no asset exists under `name`.
    pub fn open(&self, name: &str) -> Result<File, AssetStoreError> {
        let path = self.resolve(name)?;
        File::open(&path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                AssetStoreError::NotFound {
                    name: name.to_string(),
                }
            } else {
                err.into()
            }
        })
    }

    /// Writes the named asset from `src`, requiring exactly `declared_len`
    /// bytes.
    ///
    /// The bytes are streamed to a temporary file in the destination
    /// directory and renamed into place only after the length check
    /// passes, so a short or failed transfer never leaves a readable,
    /// truncated asset under `name`.
    ///
    /// # Errors
    ///
    /// [`AssetStoreError::LengthMismatch`] if the transferred byte count
    /// differs from `declared_len`; the partial artifact is discarded.
    pub fn put(
        &self,
        name: &str,
        src: &mut dyn Read,
        declared_len: u64,
        content_type: &str,
    ) -> Result<(), AssetStoreError> {
        let path = self.resolve(name)?;

        let parent = path.parent().unwrap_or(&self.dir);
        std::fs::create_dir_all(parent)?;

        // The temp file is removed on drop unless persisted, so every
        // early return below discards the partial write.
        let mut staged = NamedTempFile::new_in(parent)?;
        let written = io::copy(src, &mut staged)?;

        if written != declared_len {
            return Err(AssetStoreError::LengthMismatch {
                expected: declared_len,
                actual: written,
            });
        }

        staged.persist(&path).map_err(|err| err.error)?;
        tracing::debug!(asset = name, bytes = written, content_type, "stored asset");
        Ok(())
    }

    /// Resolves an asset name to a path under the store root.
    fn resolve(&self, name: &str) -> Result<PathBuf, AssetStoreError> {
        let relative = Path::new(name);
        let traversal = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if name.is_empty() || traversal {
            return Err(AssetStoreError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.dir.join(relative))
    }
}

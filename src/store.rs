//! Export storage
//!
//! Every saved workbook gets its own `scraped_data_<uuid>.xlsx` name, so
//! concurrent exports never overwrite each other. Retrieval accepts plain
//! file names only; anything that could leave the storage root is rejected
//! before the filesystem is touched.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Prefix of generated export names
pub const EXPORT_PREFIX: &str = "scraped_data";

/// Extension of generated export names
pub const EXPORT_EXTENSION: &str = "xlsx";

/// A workbook written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredExport {
    /// File name, usable with [`ExportStore::retrieve`]
    pub name: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Size in bytes
    pub size: usize,
}

/// Directory-backed store for exported workbooks
#[derive(Debug, Clone)]
pub struct ExportStore {
    root: PathBuf,
}

impl ExportStore {
    /// Create a store rooted at `root` (created on first save)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a fresh, unique export name
    pub fn generate_name() -> String {
        format!("{}_{}.{}", EXPORT_PREFIX, Uuid::new_v4().simple(), EXPORT_EXTENSION)
    }

    /// Write `bytes` under a freshly generated name
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(&self, bytes: &[u8]) -> Result<StoredExport, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = Self::generate_name();
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes).await?;

        info!("Saved export {}", name);
        Ok(StoredExport {
            name,
            path,
            size: bytes.len(),
        })
    }

    /// Read a previously saved export
    #[instrument(skip(self))]
    pub async fn retrieve(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve_path(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Map an export name to its path under the root, rejecting traversal
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Accept only a single, plain file name component.
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains(['/', '\\', '\0', ':'])
        || name.starts_with('~')
        || Path::new(name).is_absolute();

    if invalid {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

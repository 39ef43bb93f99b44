//! Navigation document storage
//!
//! The whole document lives in one JSON file. Reads load the entire file and
//! writes replace it; there is no locking, so concurrent writers race and
//! the last one wins.

use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Failure to read or write the backing file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize navigation data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// File-backed store for the navigation document
#[derive(Debug, Clone)]
pub struct NavigationStore {
    path: PathBuf,
}

impl NavigationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored document exactly as it is on disk (no schema check)
    pub async fn load(&self) -> Result<Value, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored document, pretty-printed with two-space indentation
    pub async fn save(&self, document: &Value) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document).map_err(StoreError::Serialize)?;

        fs::write(&self.path, content)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

//! Storage operation errors

use mediahub_core::{MediaCategory, NotSupported};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported {category} format: {mime}")]
    UnsupportedFormat {
        mime: String,
        category: MediaCategory,
    },

    #[error("Unsupported tag: {0}")]
    UnsupportedTag(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Resource unavailable: {name}")]
    ResourceUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// True when the underlying cause is a missing file rather than an I/O fault.
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::ResourceUnavailable { source, .. } | StorageError::IoError(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

impl From<NotSupported> for StorageError {
    fn from(err: NotSupported) -> Self {
        StorageError::UnsupportedFormat {
            mime: err.mime,
            category: err.category,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

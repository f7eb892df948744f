use crate::error::{StorageError, StorageResult};
use mediahub_core::MediaCategory;
use std::path::{Path, PathBuf};
use tokio::fs;

const MAX_FILE_NAME_LENGTH: usize = 255;

/// Category-partitioned local filesystem storage
///
/// Owns the three category roots under a base directory. All paths handed out by
/// the store stay inside their category root.
#[derive(Clone, Debug)]
pub struct MediaStore {
    base_path: PathBuf,
    videos: PathBuf,
    trailers: PathBuf,
    thumbnails: PathBuf,
}

/// A stored file opened for reading, with its length taken from the open handle.
#[derive(Debug)]
pub struct OpenedFile {
    pub file: fs::File,
    pub content_length: u64,
    pub path: PathBuf,
}

/// Reject anything that is not a bare file name.
///
/// Retrieval and deletion accept client-supplied names, so separators, parent
/// segments, hidden names and control characters are refused before any path is built.
pub fn validate_file_name(file_name: &str) -> StorageResult<()> {
    if file_name.is_empty() {
        return Err(StorageError::InvalidFileName(
            "File name cannot be empty".to_string(),
        ));
    }

    if file_name.len() > MAX_FILE_NAME_LENGTH {
        return Err(StorageError::InvalidFileName(format!(
            "File name exceeds {} bytes",
            MAX_FILE_NAME_LENGTH
        )));
    }

    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return Err(StorageError::InvalidFileName(format!(
            "File name '{}' contains path traversal",
            file_name
        )));
    }

    if file_name.starts_with('.') || file_name.chars().any(char::is_control) {
        return Err(StorageError::InvalidFileName(format!(
            "File name '{}' contains invalid characters",
            file_name
        )));
    }

    Ok(())
}

impl MediaStore {
    /// Create the category roots under `base_path`.
    ///
    /// Failure here is fatal: the service must not start without usable storage.
    pub async fn init(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        let store = MediaStore {
            videos: base_path.join(MediaCategory::Video.dir_name()),
            trailers: base_path.join(MediaCategory::Trailer.dir_name()),
            thumbnails: base_path.join(MediaCategory::Thumbnail.dir_name()),
            base_path,
        };

        for category in MediaCategory::ALL {
            let root = store.root(category);
            fs::create_dir_all(root).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    root.display(),
                    e
                ))
            })?;
        }

        tracing::info!(
            base_path = %store.base_path.display(),
            "Media storage roots initialized"
        );

        Ok(store)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding files of `category`.
    pub fn root(&self, category: MediaCategory) -> &Path {
        match category {
            MediaCategory::Video => &self.videos,
            MediaCategory::Trailer => &self.trailers,
            MediaCategory::Thumbnail => &self.thumbnails,
        }
    }

    /// Path of `file_name` inside the category root.
    pub fn resolve(&self, category: MediaCategory, file_name: &str) -> StorageResult<PathBuf> {
        validate_file_name(file_name)?;
        Ok(self.root(category).join(file_name))
    }

    /// Open a stored file for reading.
    ///
    /// A missing file or a failed length query surfaces as `ResourceUnavailable`;
    /// use [`StorageError::is_not_found`] to tell the two apart.
    pub async fn open(&self, category: MediaCategory, file_name: &str) -> StorageResult<OpenedFile> {
        let path = self.resolve(category, file_name)?;

        let file = fs::File::open(&path)
            .await
            .map_err(|source| StorageError::ResourceUnavailable {
                name: file_name.to_string(),
                source,
            })?;

        let metadata = file
            .metadata()
            .await
            .map_err(|source| StorageError::ResourceUnavailable {
                name: file_name.to_string(),
                source,
            })?;

        if !metadata.is_file() {
            return Err(StorageError::ResourceUnavailable {
                name: file_name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a regular file"),
            });
        }

        Ok(OpenedFile {
            file,
            content_length: metadata.len(),
            path,
        })
    }

    /// File names stored in a category, sorted.
    pub async fn list(&self, category: MediaCategory) -> StorageResult<Vec<String>> {
        let mut entries = fs::read_dir(self.root(category)).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Verify that every category root is still a directory.
    pub async fn check_ready(&self) -> StorageResult<()> {
        for category in MediaCategory::ALL {
            let root = self.root(category);
            let metadata = fs::metadata(root).await?;
            if !metadata.is_dir() {
                return Err(StorageError::ConfigError(format!(
                    "{} is not a directory",
                    root.display()
                )));
            }
        }
        Ok(())
    }
}

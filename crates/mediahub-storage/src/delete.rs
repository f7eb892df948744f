//! Multi-category deletion
//!
//! Every supplied name is validated before anything is removed. Categories are then
//! processed independently: a failure in one does not stop the others, and all
//! failures are reported together. A file that is already gone counts as deleted.

use crate::error::{StorageError, StorageResult};
use crate::store::{validate_file_name, MediaStore};
use mediahub_core::MediaCategory;
use std::io;
use tokio::fs;

/// Names to delete, at most one per category. Absent or empty names are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteRequest {
    pub thumbnail: Option<String>,
    pub video: Option<String>,
    pub trailer: Option<String>,
}

impl DeleteRequest {
    /// Non-empty targets in thumbnail, video, trailer order.
    pub fn targets(&self) -> Vec<(MediaCategory, &str)> {
        [
            (MediaCategory::Thumbnail, self.thumbnail.as_deref()),
            (MediaCategory::Video, self.video.as_deref()),
            (MediaCategory::Trailer, self.trailer.as_deref()),
        ]
        .into_iter()
        .filter_map(|(category, name)| match name {
            Some(name) if !name.is_empty() => Some((category, name)),
            _ => None,
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.targets().is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct DeletionCoordinator {
    store: MediaStore,
}

impl DeletionCoordinator {
    pub fn new(store: MediaStore) -> Self {
        Self { store }
    }

    pub async fn delete(&self, request: &DeleteRequest) -> StorageResult<()> {
        let targets = request.targets();

        for (_, name) in &targets {
            validate_file_name(name)?;
        }

        let mut failures = Vec::new();
        for (category, name) in targets {
            let path = self.store.resolve(category, name)?;

            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::info!(
                        path = %path.display(),
                        category = %category,
                        "Deleted stored file"
                    );
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(
                        path = %path.display(),
                        category = %category,
                        "File already absent"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        path = %path.display(),
                        category = %category,
                        "Failed to delete stored file"
                    );
                    failures.push(format!("{} {}: {}", category, name, e));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StorageError::DeleteFailed(failures.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup() -> (tempfile::TempDir, DeletionCoordinator) {
        let dir = tempdir().unwrap();
        let store = MediaStore::init(dir.path()).await.unwrap();
        (dir, DeletionCoordinator::new(store))
    }

    #[test]
    fn test_targets_skip_empty_names() {
        let request = DeleteRequest {
            thumbnail: Some(String::new()),
            video: Some("v.mp4".to_string()),
            trailer: None,
        };
        assert_eq!(request.targets(), vec![(MediaCategory::Video, "v.mp4")]);
        assert!(DeleteRequest::default().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (dir, deleter) = setup().await;
        let video = dir.path().join("videos").join("a.mp4");
        let thumb = dir.path().join("thumbnails").join("a.jpg");
        std::fs::write(&video, b"v").unwrap();
        std::fs::write(&thumb, b"t").unwrap();

        let request = DeleteRequest {
            thumbnail: Some("a.jpg".to_string()),
            video: Some("a.mp4".to_string()),
            trailer: Some("a.mov".to_string()),
        };

        deleter.delete(&request).await.unwrap();
        assert!(!video.exists());
        assert!(!thumb.exists());

        deleter.delete(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_name_deletes_nothing() {
        let (dir, deleter) = setup().await;
        let thumb = dir.path().join("thumbnails").join("keep.jpg");
        std::fs::write(&thumb, b"t").unwrap();

        let request = DeleteRequest {
            thumbnail: Some("keep.jpg".to_string()),
            video: Some("../../etc/passwd".to_string()),
            trailer: None,
        };

        let err = deleter.delete(&request).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileName(_)));
        assert!(thumb.exists());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_other_categories() {
        let (dir, deleter) = setup().await;
        // A directory cannot be removed with remove_file
        std::fs::create_dir(dir.path().join("videos").join("stuck.mp4")).unwrap();
        let trailer = dir.path().join("trailers").join("gone.mov");
        std::fs::write(&trailer, b"t").unwrap();

        let request = DeleteRequest {
            thumbnail: None,
            video: Some("stuck.mp4".to_string()),
            trailer: Some("gone.mov".to_string()),
        };

        let err = deleter.delete(&request).await.unwrap_err();
        match err {
            StorageError::DeleteFailed(message) => assert!(message.contains("stuck.mp4")),
            other => panic!("Expected DeleteFailed, got {other:?}"),
        }
        assert!(!trailer.exists());
    }
}

//! Stored file naming
//!
//! Names are `{unique_id}.{extension}`. The unique id comes from an injected
//! [`IdGenerator`]; the extension always comes from the content-type registry and
//! never from anything the client sent.

use crate::error::{StorageError, StorageResult};
use crate::store::MediaStore;
use mediahub_core::{ContentTypeRegistry, MediaCategory, StoredFile};
use std::sync::Arc;
use uuid::Uuid;

/// Source of batch-unique identifiers.
///
/// Uploads rely on distinct identifiers for isolation; a deterministic
/// implementation must still never repeat an id across batches.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random 128-bit identifiers (UUID v4, hyphenated).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

#[derive(Clone)]
pub struct FileNamer {
    registry: Arc<ContentTypeRegistry>,
    store: MediaStore,
}

impl FileNamer {
    pub fn new(registry: Arc<ContentTypeRegistry>, store: MediaStore) -> Self {
        Self { registry, store }
    }

    pub fn store(&self) -> &MediaStore {
        &self.store
    }

    /// Decide category and stored name for one upload part.
    pub fn name(
        &self,
        unique_id: &str,
        field_tag: &str,
        declared_mime: &str,
    ) -> StorageResult<StoredFile> {
        let category = MediaCategory::from_field_tag(field_tag)
            .ok_or_else(|| StorageError::UnsupportedTag(field_tag.to_string()))?;

        let extension = self.registry.extension_for(category, declared_mime)?;

        let file_name = format!("{}.{}", unique_id, extension);
        let storage_path = self.store.resolve(category, &file_name)?;

        Ok(StoredFile::new(file_name, category, storage_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use tempfile::tempdir;

    async fn namer(dir: &std::path::Path) -> FileNamer {
        let store = MediaStore::init(dir).await.unwrap();
        FileNamer::new(Arc::new(ContentTypeRegistry::default()), store)
    }

    #[tokio::test]
    async fn test_names_follow_tag_and_registry() {
        let dir = tempdir().unwrap();
        let namer = namer(dir.path()).await;
        let id = UuidGenerator.generate();
        let pattern = Regex::new(r"^[A-Za-z0-9-]+\.[a-z0-9]+$").unwrap();

        let registry = ContentTypeRegistry::default();
        let cases = registry
            .video_types()
            .flat_map(|(mime, ext)| {
                [
                    ("videoFile", mime, ext, MediaCategory::Video),
                    ("trailerFile", mime, ext, MediaCategory::Trailer),
                ]
            })
            .chain(
                registry
                    .image_types()
                    .map(|(mime, ext)| ("thumbnailFile", mime, ext, MediaCategory::Thumbnail)),
            );

        for (tag, mime, ext, category) in cases {
            let stored = namer.name(&id, tag, mime).unwrap();
            assert_eq!(stored.file_name(), format!("{}.{}", id, ext));
            assert!(pattern.is_match(stored.file_name()));
            assert_eq!(stored.category(), category);
            assert_eq!(
                stored.storage_path(),
                dir.path().join(category.dir_name()).join(stored.file_name())
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_mime_is_unsupported_format() {
        let dir = tempdir().unwrap();
        let namer = namer(dir.path()).await;

        for tag in ["videoFile", "trailerFile", "thumbnailFile"] {
            let err = namer.name("id", tag, "application/x-msdownload").unwrap_err();
            match err {
                StorageError::UnsupportedFormat { mime, .. } => {
                    assert_eq!(mime, "application/x-msdownload")
                }
                other => panic!("Expected UnsupportedFormat, got {other:?}"),
            }
        }

        // Image type under a video tag and vice versa
        assert!(matches!(
            namer.name("id", "videoFile", "image/png"),
            Err(StorageError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            namer.name("id", "thumbnailFile", "video/mp4"),
            Err(StorageError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_tag() {
        let dir = tempdir().unwrap();
        let namer = namer(dir.path()).await;

        let err = namer.name("id", "posterFile", "image/png").unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedTag(tag) if tag == "posterFile"));
    }

    #[tokio::test]
    async fn test_bad_identifier_cannot_escape_root() {
        let dir = tempdir().unwrap();
        let namer = namer(dir.path()).await;

        let err = namer.name("../../x", "videoFile", "video/mp4").unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileName(_)));
    }

    #[test]
    fn test_closure_generator() {
        let generator = || "fixed-id".to_string();
        assert_eq!(IdGenerator::generate(&generator), "fixed-id");
    }
}

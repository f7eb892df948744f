//! Batch upload writes
//!
//! One upload request is one batch: a single fresh identifier shared by every part,
//! so files from one submission are named consistently and never collide with
//! another submission.
//!
//! Parts are written in order. The first failing part aborts the batch and files
//! already written for earlier parts stay on disk; there is no rollback. A copy that
//! is cancelled (future dropped, request timeout) leaves a truncated destination file
//! that must not be treated as a valid stored file.

use crate::error::{StorageError, StorageResult};
use crate::naming::{FileNamer, IdGenerator};
use bytes::Bytes;
use mediahub_core::StoredFile;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncRead;

/// One named part of an upload request.
pub struct UploadPart {
    pub field_tag: String,
    pub content_type: String,
    pub reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
}

impl UploadPart {
    pub fn new(
        field_tag: impl Into<String>,
        content_type: impl Into<String>,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            field_tag: field_tag.into(),
            content_type: content_type.into(),
            reader: Box::pin(reader),
        }
    }

    pub fn from_bytes(
        field_tag: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self::new(field_tag, content_type, Cursor::new(data.into()))
    }
}

#[derive(Clone)]
pub struct UploadWriter {
    namer: FileNamer,
    ids: Arc<dyn IdGenerator>,
}

impl UploadWriter {
    pub fn new(namer: FileNamer, ids: Arc<dyn IdGenerator>) -> Self {
        Self { namer, ids }
    }

    /// Start a batch with a freshly generated identifier.
    ///
    /// Used directly by callers that receive parts one at a time (multipart bodies).
    pub fn begin(&self) -> UploadBatch<'_> {
        UploadBatch {
            namer: &self.namer,
            unique_id: self.ids.generate(),
            stored: BTreeMap::new(),
        }
    }

    /// Write every part of one request and return field tag to stored file name.
    pub async fn write<I>(&self, parts: I) -> StorageResult<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = UploadPart>,
    {
        let mut batch = self.begin();
        for mut part in parts {
            batch
                .write_part(&part.field_tag, &part.content_type, &mut part.reader)
                .await?;
        }
        Ok(batch.finish())
    }
}

/// An in-progress upload batch.
pub struct UploadBatch<'a> {
    namer: &'a FileNamer,
    unique_id: String,
    stored: BTreeMap<String, String>,
}

impl UploadBatch<'_> {
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Field tag to stored file name for the parts written so far.
    pub fn stored(&self) -> &BTreeMap<String, String> {
        &self.stored
    }

    /// Name and copy one part, overwriting any file already at the destination.
    ///
    /// A repeated field tag in the same batch maps to the same name, so the later
    /// part replaces the earlier one.
    pub async fn write_part<R>(
        &mut self,
        field_tag: &str,
        declared_mime: &str,
        reader: &mut R,
    ) -> StorageResult<StoredFile>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let stored = self.namer.name(&self.unique_id, field_tag, declared_mime)?;
        let path = stored.storage_path();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let bytes_copied = tokio::io::copy(reader, &mut file).await.map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                field_tag = %field_tag,
                error = %e,
                "Upload copy aborted; destination left incomplete"
            );
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            field_tag = %field_tag,
            category = %stored.category(),
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored upload part"
        );

        self.stored
            .insert(field_tag.to_string(), stored.file_name().to_string());
        Ok(stored)
    }

    pub fn finish(self) -> BTreeMap<String, String> {
        self.stored
    }
}

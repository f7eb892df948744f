//! Partial-content region planning and reads

use crate::error::{StorageError, StorageResult};
use crate::store::{MediaStore, OpenedFile};
use mediahub_core::{ByteRegion, MediaCategory, RequestedRange, MAX_CHUNK};
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, Take};

#[derive(Clone, Debug)]
pub struct RangeStreamer {
    store: MediaStore,
}

impl RangeStreamer {
    pub fn new(store: MediaStore) -> Self {
        Self { store }
    }

    /// Region to return for a resource of `content_length` bytes.
    ///
    /// Without a range the first `MAX_CHUNK` bytes are returned. With a range the
    /// region starts at `start` and is capped at `MAX_CHUNK` bytes. `requested` must
    /// already be resolved against `content_length`; out-of-bounds input is clamped
    /// so that `offset + length <= content_length` always holds.
    pub fn plan(content_length: u64, requested: Option<RequestedRange>) -> ByteRegion {
        let Some(range) = requested else {
            return ByteRegion::new(0, content_length.min(MAX_CHUNK));
        };

        if range.start >= content_length {
            return ByteRegion::new(content_length, 0);
        }

        let last = content_length - 1;
        let end = range.end.unwrap_or(last).min(last);
        if end < range.start {
            return ByteRegion::new(range.start, 0);
        }

        ByteRegion::new(range.start, (end - range.start + 1).min(MAX_CHUNK))
    }

    /// Open a stored video or trailer for ranged reading.
    pub async fn open(&self, category: MediaCategory, file_name: &str) -> StorageResult<OpenedFile> {
        self.store.open(category, file_name).await
    }

    /// Reader yielding exactly the bytes of `region`.
    pub async fn region_reader(
        &self,
        opened: OpenedFile,
        region: ByteRegion,
    ) -> StorageResult<Take<File>> {
        let OpenedFile {
            mut file,
            content_length,
            path,
        } = opened;

        if region.offset + region.length > content_length {
            return Err(StorageError::ResourceUnavailable {
                name: path.display().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "region extends past end of file",
                ),
            });
        }

        file.seek(SeekFrom::Start(region.offset)).await?;

        tracing::debug!(
            path = %path.display(),
            offset = region.offset,
            length = region.length,
            total = content_length,
            "Serving byte region"
        );

        Ok(file.take(region.length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_no_range_caps_at_max_chunk() {
        assert_eq!(
            RangeStreamer::plan(5_000_000, None),
            ByteRegion::new(0, 1_000_000)
        );
    }

    #[test]
    fn test_no_range_small_file_is_whole_file() {
        assert_eq!(
            RangeStreamer::plan(500_000, None),
            ByteRegion::new(0, 500_000)
        );
    }

    #[test]
    fn test_tail_range() {
        let requested = RequestedRange::new(4_500_000, Some(4_999_999));
        assert_eq!(
            RangeStreamer::plan(5_000_000, Some(requested)),
            ByteRegion::new(4_500_000, 500_000)
        );
    }

    #[test]
    fn test_large_range_is_clamped() {
        let requested = RequestedRange::new(0, Some(1_999_999));
        assert_eq!(
            RangeStreamer::plan(5_000_000, Some(requested)),
            ByteRegion::new(0, 1_000_000)
        );
    }

    #[test]
    fn test_open_ended_range() {
        let requested = RequestedRange::new(2_000_000, None);
        assert_eq!(
            RangeStreamer::plan(5_000_000, Some(requested)),
            ByteRegion::new(2_000_000, 1_000_000)
        );

        let requested = RequestedRange::new(4_800_000, None);
        assert_eq!(
            RangeStreamer::plan(5_000_000, Some(requested)),
            ByteRegion::new(4_800_000, 200_000)
        );
    }

    #[test]
    fn test_region_never_exceeds_resource() {
        for (len, start, end) in [
            (10, 0, Some(100)),
            (10, 9, None),
            (10, 12, Some(20)),
            (0, 0, None),
            (1, 0, Some(0)),
        ] {
            let region = RangeStreamer::plan(len, Some(RequestedRange::new(start, end)));
            assert!(region.offset + region.length <= len);
            assert!(region.length <= MAX_CHUNK);
        }
        assert_eq!(RangeStreamer::plan(0, None), ByteRegion::new(0, 0));
    }

    #[tokio::test]
    async fn test_region_reader_returns_slice() {
        let dir = tempdir().unwrap();
        let store = MediaStore::init(dir.path()).await.unwrap();
        let data: Vec<u8> = (0..100u8).collect();
        std::fs::write(dir.path().join("videos").join("clip.mp4"), &data).unwrap();

        let streamer = RangeStreamer::new(store);
        let opened = streamer
            .open(MediaCategory::Video, "clip.mp4")
            .await
            .unwrap();
        let region = RangeStreamer::plan(
            opened.content_length,
            Some(RequestedRange::new(10, Some(19))),
        );

        let mut reader = streamer.region_reader(opened, region).await.unwrap();
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, data[10..20].to_vec());
    }

    #[tokio::test]
    async fn test_missing_file_is_resource_unavailable() {
        let dir = tempdir().unwrap();
        let store = MediaStore::init(dir.path()).await.unwrap();
        let streamer = RangeStreamer::new(store);

        let err = streamer
            .open(MediaCategory::Trailer, "gone.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ResourceUnavailable { .. }));
        assert!(err.is_not_found());
    }
}

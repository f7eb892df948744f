use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use utoipa::ToSchema;

/// Media category
///
/// Every stored file belongs to exactly one category, which decides both the
/// storage subdirectory and the content-type table its declared MIME type is
/// checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Video,
    Trailer,
    Thumbnail,
}

/// Which of the two content-type tables a category validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTable {
    Image,
    Video,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 3] = [
        MediaCategory::Video,
        MediaCategory::Trailer,
        MediaCategory::Thumbnail,
    ];

    /// Storage subdirectory under the base directory.
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaCategory::Video => "videos",
            MediaCategory::Trailer => "trailers",
            MediaCategory::Thumbnail => "thumbnails",
        }
    }

    pub fn table(self) -> ContentTable {
        match self {
            MediaCategory::Video | MediaCategory::Trailer => ContentTable::Video,
            MediaCategory::Thumbnail => ContentTable::Image,
        }
    }

    /// Multipart field tag that uploads into this category.
    pub fn field_tag(self) -> &'static str {
        match self {
            MediaCategory::Video => "videoFile",
            MediaCategory::Trailer => "trailerFile",
            MediaCategory::Thumbnail => "thumbnailFile",
        }
    }

    /// Resolve an upload field tag. Unknown tags yield `None`.
    pub fn from_field_tag(tag: &str) -> Option<Self> {
        match tag {
            "videoFile" => Some(MediaCategory::Video),
            "trailerFile" => Some(MediaCategory::Trailer),
            "thumbnailFile" => Some(MediaCategory::Thumbnail),
            _ => None,
        }
    }

    /// Singular label used in listings ("video", "trailer", "thumbnail").
    pub fn label(self) -> &'static str {
        match self {
            MediaCategory::Video => "video",
            MediaCategory::Trailer => "trailer",
            MediaCategory::Thumbnail => "thumbnail",
        }
    }
}

/// Accepts either the singular label or the directory name, case-insensitively.
impl FromStr for MediaCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" | "videos" => Ok(MediaCategory::Video),
            "trailer" | "trailers" => Ok(MediaCategory::Trailer),
            "thumbnail" | "thumbnails" => Ok(MediaCategory::Thumbnail),
            _ => Err(anyhow::anyhow!("Invalid media category: {}", s)),
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A file placed (or about to be placed) in category storage.
///
/// `file_name` is always `{unique_id}.{extension}` and `storage_path` is always
/// `root(category)/file_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    file_name: String,
    category: MediaCategory,
    storage_path: PathBuf,
}

impl StoredFile {
    pub fn new(file_name: String, category: MediaCategory, storage_path: PathBuf) -> Self {
        Self {
            file_name,
            category,
            storage_path,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn category(&self) -> MediaCategory {
        self.category
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }
}

/// Contiguous slice of a resource selected for a partial-content response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRegion {
    pub offset: u64,
    pub length: u64,
}

impl ByteRegion {
    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// Only possible for an empty resource.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Inclusive index of the last byte, `None` for an empty region.
    pub fn last_byte(&self) -> Option<u64> {
        if self.length == 0 {
            None
        } else {
            Some(self.offset + self.length - 1)
        }
    }

    /// `Content-Range` header value for this region of a resource of `total` bytes.
    pub fn content_range(&self, total: u64) -> String {
        match self.last_byte() {
            Some(last) => format!("bytes {}-{}/{}", self.offset, last, total),
            None => format!("bytes */{}", total),
        }
    }
}

/// A single client-requested range, already resolved against the resource length.
///
/// Bounds are inclusive; `end == None` means "through the last byte".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl RequestedRange {
    pub fn new(start: u64, end: Option<u64>) -> Self {
        Self { start, end }
    }
}

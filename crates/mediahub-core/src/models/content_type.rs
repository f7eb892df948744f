//! Content-type to extension registry
//!
//! Two disjoint tables, one for image types and one for video types. The registry is
//! built once at startup and shared read-only; the extension of every stored file is
//! taken from here and never from the client.

use super::media::{ContentTable, MediaCategory};
use std::collections::BTreeMap;

const DEFAULT_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/bmp", "bmp"),
    ("image/webp", "webp"),
    ("image/svg+xml", "svg"),
];

const DEFAULT_VIDEO_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/x-msvideo", "avi"),
    ("video/quicktime", "mov"),
    ("video/x-ms-wmv", "wmv"),
    ("video/x-matroska", "mkv"),
    ("video/webm", "webm"),
    ("video/x-flv", "flv"),
];

/// Declared content type is not in the table for the requested category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported {category} format: {mime}")]
pub struct NotSupported {
    pub mime: String,
    pub category: MediaCategory,
}

/// Registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Content type '{0}' appears in both the image and video tables")]
    Overlap(String),

    #[error("Invalid extension '{extension}' for content type '{mime}'")]
    InvalidExtension { mime: String, extension: String },

    #[error("Invalid content type mapping: {0}")]
    InvalidMapping(String),
}

/// Normalize MIME type by stripping parameters and case (e.g. "Video/MP4; codecs=avc1" -> "video/mp4").
pub fn normalize_mime(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

fn is_valid_extension(extension: &str) -> bool {
    !extension.is_empty()
        && extension.len() <= 10
        && extension
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct ContentTypeRegistry {
    image: BTreeMap<String, String>,
    video: BTreeMap<String, String>,
}

impl ContentTypeRegistry {
    /// Build a registry, enforcing disjoint tables and short lowercase alphanumeric extensions.
    pub fn new<I, V, K, E>(image: I, video: V) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, E)>,
        V: IntoIterator<Item = (K, E)>,
        K: AsRef<str>,
        E: AsRef<str>,
    {
        let image = Self::build_table(image)?;
        let video = Self::build_table(video)?;

        if let Some(mime) = image.keys().find(|mime| video.contains_key(*mime)) {
            return Err(RegistryError::Overlap(mime.clone()));
        }

        Ok(Self { image, video })
    }

    fn build_table<T, K, E>(entries: T) -> Result<BTreeMap<String, String>, RegistryError>
    where
        T: IntoIterator<Item = (K, E)>,
        K: AsRef<str>,
        E: AsRef<str>,
    {
        let mut table = BTreeMap::new();
        for (mime, extension) in entries {
            let mime = normalize_mime(mime.as_ref());
            let extension = extension.as_ref().trim().to_string();
            if mime.is_empty() || !mime.contains('/') {
                return Err(RegistryError::InvalidMapping(mime));
            }
            if !is_valid_extension(&extension) {
                return Err(RegistryError::InvalidExtension { mime, extension });
            }
            table.insert(mime, extension);
        }
        Ok(table)
    }

    /// Parse a `mime=ext,mime=ext` list as used by the `*_CONTENT_TYPES` variables.
    pub fn parse_table(table: &str) -> Result<Vec<(String, String)>, RegistryError> {
        table
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .split_once('=')
                    .map(|(mime, ext)| (mime.trim().to_string(), ext.trim().to_string()))
                    .ok_or_else(|| RegistryError::InvalidMapping(entry.to_string()))
            })
            .collect()
    }

    fn table(&self, table: ContentTable) -> &BTreeMap<String, String> {
        match table {
            ContentTable::Image => &self.image,
            ContentTable::Video => &self.video,
        }
    }

    /// Extension for `mime` in the table associated with `category`.
    pub fn extension_for(&self, category: MediaCategory, mime: &str) -> Result<&str, NotSupported> {
        self.table(category.table())
            .get(&normalize_mime(mime))
            .map(String::as_str)
            .ok_or_else(|| NotSupported {
                mime: mime.to_string(),
                category,
            })
    }

    pub fn image_types(&self) -> impl Iterator<Item = (&str, &str)> {
        self.image.iter().map(|(m, e)| (m.as_str(), e.as_str()))
    }

    pub fn video_types(&self) -> impl Iterator<Item = (&str, &str)> {
        self.video.iter().map(|(m, e)| (m.as_str(), e.as_str()))
    }
}

impl Default for ContentTypeRegistry {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE_TYPES
                .iter()
                .map(|(m, e)| (m.to_string(), e.to_string()))
                .collect(),
            video: DEFAULT_VIDEO_TYPES
                .iter()
                .map(|(m, e)| (m.to_string(), e.to_string()))
                .collect(),
        }
    }
}
